//! Query executor: turns one search term into a [`QueryOutcome`].
//!
//! The executor is the error boundary for keyword searches. A transport
//! failure of any kind is logged here and folded into
//! [`QueryOutcome::TransportFailure`]; nothing propagates to the caller.

use std::sync::Arc;

use reelscout_common::{QueryOutcome, SearchQuery};
use tracing::{info, warn};

use crate::catalog::{CatalogService, Envelope};

/// Status text used when the catalog rejects a search without a reason.
pub const NO_RESULTS_MESSAGE: &str = "Inga träffar.";

/// Issues keyword searches and interprets the response envelope.
#[derive(Clone)]
pub struct QueryExecutor {
    catalog: Arc<dyn CatalogService>,
}

impl QueryExecutor {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self { catalog }
    }

    /// Run a single search. Never retries.
    pub async fn search(&self, query: &SearchQuery) -> QueryOutcome {
        info!(
            query = %query,
            catalog = self.catalog.name(),
            "Searching catalog"
        );

        let outcome = match self.catalog.search(query.as_str()).await {
            Ok(Envelope::Found(page)) => QueryOutcome::Success {
                items: page.items,
                total: page.total,
            },
            Ok(Envelope::Failed { reason }) => QueryOutcome::Empty {
                reason: reason
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| NO_RESULTS_MESSAGE.to_string()),
            },
            Err(e) => {
                warn!(query = %query, error = ?e, "Catalog search failed");
                QueryOutcome::TransportFailure
            }
        };

        info!(query = %query, outcome = outcome.kind(), "Search finished");
        outcome
    }
}
