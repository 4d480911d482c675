//! Reelscout-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across reelscout:
//!
//! - **Core Types**: Search results, query outcomes, and rating states
//! - **Search Tokens**: Validated queries and per-search generation markers
//! - **Encoding**: Percent-encoding for URL components and data URIs
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use reelscout_common::{RatingState, SearchQuery, Error, Result};
//! use reelscout_common::encode::encode_component;
//!
//! // Validate user input before searching
//! let query = SearchQuery::new("  christmas  ").unwrap();
//! assert_eq!(query.as_str(), "christmas");
//!
//! // Ratings settle exactly once
//! let settled = RatingState::Pending.settle(Some("8.2".into())).unwrap();
//! assert!(settled.settle(None).is_err());
//!
//! // Encode a query term for a URL
//! assert_eq!(encode_component("home alone"), "home%20alone");
//! ```

pub mod encode;
pub mod error;
pub mod search;
pub mod types;

pub use error::{Error, Result};
pub use search::*;
pub use types::*;
