//! Core type definitions for search results and their enrichment state.
//!
//! All types serialize with `snake_case` tags so that view snapshots can be
//! emitted as JSON by front ends.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Value the catalog uses in place of a missing poster URL.
pub const POSTER_NOT_AVAILABLE: &str = "N/A";

/// One summary record returned by a catalog search.
///
/// Immutable once produced; the renderer only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Opaque external identifier (e.g. an IMDb id such as `tt0099785`).
    pub id: String,
    /// Display title, if the catalog supplied one.
    pub title: Option<String>,
    /// Release year as reported by the catalog (may be a range like `2019–`).
    pub year: Option<String>,
    /// Poster URL. May hold the [`POSTER_NOT_AVAILABLE`] sentinel.
    pub poster_url: Option<String>,
}

impl SearchResult {
    /// Poster URL with the "not available" sentinel and blank values removed.
    pub fn usable_poster(&self) -> Option<&str> {
        self.poster_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && *url != POSTER_NOT_AVAILABLE)
    }
}

/// Result of a single user-initiated search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// The catalog returned a result list.
    Success {
        /// Items in catalog order. May be longer than what gets rendered.
        items: Vec<SearchResult>,
        /// Total as reported by the catalog, shown verbatim.
        total: String,
    },
    /// The catalog answered with an explicit failure.
    Empty {
        /// Human-readable reason, shown verbatim in the status line.
        reason: String,
    },
    /// The request never produced a usable envelope.
    TransportFailure,
}

impl QueryOutcome {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Empty { .. } => "empty",
            Self::TransportFailure => "transport_failure",
        }
    }
}

/// Enrichment state of a single displayed card.
///
/// Starts as [`RatingState::Pending`] and settles exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RatingState {
    /// The lookup has not settled yet.
    Pending,
    /// The catalog reported a rating.
    Resolved(String),
    /// The lookup failed or had no rating.
    Unavailable,
}

impl RatingState {
    /// Returns `true` while the lookup is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Settle a pending rating with the outcome of its lookup.
    ///
    /// `Some(value)` becomes [`RatingState::Resolved`], `None` becomes
    /// [`RatingState::Unavailable`]. Settling an already settled state is an
    /// error.
    pub fn settle(&self, rating: Option<String>) -> Result<Self> {
        if !self.is_pending() {
            return Err(Error::invalid_transition(self.to_string()));
        }
        Ok(match rating {
            Some(value) => Self::Resolved(value),
            None => Self::Unavailable,
        })
    }
}

impl fmt::Display for RatingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Resolved(_) => write!(f, "resolved"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}
