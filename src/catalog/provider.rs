//! Trait definition and types for catalog services.
//!
//! The [`CatalogService`] trait splits failures in two: a transport problem
//! (connection refused, timeout, undecodable body) is an `Err`, while an
//! explicit "no" from the service is an `Ok(Envelope::Failed)`. Callers rely
//! on that split to choose between the network-failure status and the
//! service's own reason.

use async_trait::async_trait;
use reelscout_common::SearchResult;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Success/failure wrapper every catalog response arrives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<T> {
    /// The service answered with a payload.
    Found(T),
    /// The service answered with an explicit failure flag.
    Failed {
        /// Reason text, when the service provided one.
        reason: Option<String>,
    },
}

impl<T> Envelope<T> {
    /// Build a failed envelope with a reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: Some(reason.into()),
        }
    }

    /// The payload, if the service reported success.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// One page of keyword search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Items in service order.
    pub items: Vec<SearchResult>,
    /// Total hit count as reported by the service. Not necessarily
    /// `items.len()`.
    pub total: String,
}

/// Detail record for a single identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TitleDetail {
    /// Identifier echoed back by the service.
    pub id: Option<String>,
    /// Title, if present.
    pub title: Option<String>,
    /// Audience rating as reported (e.g. `"8.2"`).
    pub rating: Option<String>,
}

// ---------------------------------------------------------------------------
// Service trait
// ---------------------------------------------------------------------------

/// Async trait implemented by catalog backends.
///
/// Implementations are shared across enrichment tasks behind an `Arc`.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Short, lowercase identifier for this service (e.g. `"omdb"`).
    fn name(&self) -> &'static str;

    /// Keyword search. `query` is the raw (trimmed) term; implementations
    /// are responsible for encoding it.
    async fn search(&self, query: &str) -> anyhow::Result<Envelope<SearchPage>>;

    /// Full detail for one identifier.
    async fn lookup(&self, id: &str) -> anyhow::Result<Envelope<TitleDetail>>;
}
