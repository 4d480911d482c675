//! Per-item rating enrichment.
//!
//! The [`RatingResolver`] performs one catalog lookup per identifier and
//! reduces the answer to an optional rating string. "Not found", a failure
//! envelope, a missing rating field and a transport error all collapse into
//! `None`; callers cannot tell them apart.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::{CatalogService, Envelope};

/// Resolves ratings for individual catalog identifiers.
#[derive(Clone)]
pub struct RatingResolver {
    catalog: Arc<dyn CatalogService>,
}

impl RatingResolver {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self { catalog }
    }

    /// Look up the rating for `id`. Never fails.
    pub async fn resolve_rating(&self, id: &str) -> Option<String> {
        match self.catalog.lookup(id).await {
            Ok(Envelope::Found(detail)) => {
                debug!(id = id, rating = ?detail.rating, "Rating lookup settled");
                detail.rating
            }
            Ok(Envelope::Failed { reason }) => {
                debug!(id = id, reason = ?reason, "Catalog has no detail for id");
                None
            }
            Err(e) => {
                warn!(id = id, error = ?e, "Rating lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::catalog::{SearchPage, TitleDetail};
    use async_trait::async_trait;

    /// Stub catalog with a fixed answer per id.
    struct StubCatalog;

    #[async_trait]
    impl CatalogService for StubCatalog {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn search(&self, _query: &str) -> anyhow::Result<Envelope<SearchPage>> {
            Ok(Envelope::Failed { reason: None })
        }

        async fn lookup(&self, id: &str) -> anyhow::Result<Envelope<TitleDetail>> {
            match id {
                "rated" => Ok(Envelope::Found(TitleDetail {
                    id: Some(id.to_string()),
                    title: Some("Rated".to_string()),
                    rating: Some("8.2".to_string()),
                })),
                "unrated" => Ok(Envelope::Found(TitleDetail::default())),
                "missing" => Ok(Envelope::failed("Incorrect IMDb ID.")),
                _ => Err(anyhow::anyhow!("connection reset")),
            }
        }
    }

    fn resolver() -> RatingResolver {
        RatingResolver::new(Arc::new(StubCatalog))
    }

    #[tokio::test]
    async fn returns_rating_on_success() {
        assert_eq!(resolver().resolve_rating("rated").await.as_deref(), Some("8.2"));
    }

    #[tokio::test]
    async fn missing_field_failure_and_error_are_all_none() {
        let r = resolver();
        assert_eq!(r.resolve_rating("unrated").await, None);
        assert_eq!(r.resolve_rating("missing").await, None);
        assert_eq!(r.resolve_rating("broken").await, None);
    }
}
