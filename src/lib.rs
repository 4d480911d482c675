//! Reelscout - Movie catalog search with progressive rating enrichment
//!
//! This library crate exposes the core functionality for integration testing.

pub mod browser;
pub mod catalog;
pub mod config;
pub mod enrichment;
pub mod search;
pub mod view;

pub use browser::MovieBrowser;
