//! Keyword search against the catalog.

pub mod executor;

pub use executor::{QueryExecutor, NO_RESULTS_MESSAGE};
