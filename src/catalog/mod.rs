//! Catalog service access for keyword search and identifier lookup.
//!
//! This module defines a generic [`CatalogService`] trait and the envelope
//! types shared by its implementations, so the query executor and the rating
//! resolver can be exercised against stubs as well as the live service.
//!
//! # Module layout
//!
//! - [`provider`] -- Trait definition and shared data types.
//! - [`omdb`] -- OMDb-compatible HTTP client.

pub mod omdb;
pub mod provider;

pub use omdb::OmdbClient;
pub use provider::{CatalogService, Envelope, SearchPage, TitleDetail};
