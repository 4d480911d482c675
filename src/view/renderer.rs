//! Progressive renderer: bulk-insert cards, then enrich each one in place.
//!
//! [`Renderer::render`] inserts every card synchronously with a pending rating
//! and spawns one detached Tokio task per card to resolve its rating. Tasks
//! are independent: they settle in whatever order the catalog answers, a
//! failed lookup only affects its own card, and nothing waits for them unless
//! the caller asks to via [`EnrichmentTasks::wait`].

use std::sync::Arc;

use futures::future::join_all;
use reelscout_common::{Generation, SearchResult};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{DisplayUnit, PatchOutcome, ResultsView};
use crate::enrichment::RatingResolver;

/// Default cap on rendered cards per search.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// The enrichment tasks spawned by one render.
///
/// Dropping this handle detaches the tasks; they still run to completion.
#[must_use = "dropping EnrichmentTasks detaches the tasks; call wait() to await them"]
pub struct EnrichmentTasks {
    generation: Generation,
    handles: Vec<JoinHandle<()>>,
}

impl EnrichmentTasks {
    pub(crate) fn empty(generation: Generation) -> Self {
        Self {
            generation,
            handles: Vec::new(),
        }
    }

    /// Generation the tasks patch into.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait until every task has settled.
    pub async fn wait(self) {
        for result in join_all(self.handles).await {
            if let Err(e) = result {
                warn!(error = %e, "Enrichment task did not complete");
            }
        }
    }
}

pub struct Renderer {
    view: Arc<ResultsView>,
    resolver: RatingResolver,
    max_results: usize,
}

impl Renderer {
    pub fn new(view: Arc<ResultsView>, resolver: RatingResolver, max_results: usize) -> Self {
        Self {
            view,
            resolver,
            max_results,
        }
    }

    /// Replace the grid with `results`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn render(&self, results: Vec<SearchResult>) -> EnrichmentTasks {
        let generation = self.view.clear_grid();
        self.fill(generation, results)
    }

    /// Replace the grid with `results` unless a newer search has started
    /// since `claimed` was issued. A superseded render touches nothing.
    pub fn render_for(&self, claimed: Generation, results: Vec<SearchResult>) -> EnrichmentTasks {
        match self.view.clear_grid_after(claimed) {
            Some(generation) => self.fill(generation, results),
            None => {
                debug!(generation = %claimed, "Skipping render for superseded search");
                EnrichmentTasks::empty(claimed)
            }
        }
    }

    fn fill(&self, generation: Generation, results: Vec<SearchResult>) -> EnrichmentTasks {
        if results.is_empty() {
            self.view.show_no_results(generation);
            return EnrichmentTasks::empty(generation);
        }

        if results.len() > self.max_results {
            debug!(
                received = results.len(),
                shown = self.max_results,
                "Truncating results"
            );
        }

        let mut handles = Vec::with_capacity(results.len().min(self.max_results));
        for (index, result) in results.into_iter().take(self.max_results).enumerate() {
            let id = result.id.clone();
            if !self.view.insert_card(generation, DisplayUnit::new(index, result)) {
                debug!(generation = %generation, "Render superseded before all cards were inserted");
                break;
            }

            let view = Arc::clone(&self.view);
            let resolver = self.resolver.clone();
            handles.push(tokio::spawn(async move {
                let rating = resolver.resolve_rating(&id).await;
                apply_rating(&view, generation, index, &id, rating);
            }));
        }

        EnrichmentTasks {
            generation,
            handles,
        }
    }
}

fn apply_rating(
    view: &ResultsView,
    generation: Generation,
    index: usize,
    id: &str,
    rating: Option<String>,
) {
    match view.patch_rating(generation, index, rating) {
        Ok(PatchOutcome::Applied) => {}
        Ok(PatchOutcome::Superseded) => {
            debug!(id = id, generation = %generation, "Discarding rating for superseded search");
        }
        Ok(PatchOutcome::Missing) => {
            warn!(id = id, index = index, "Card vanished before its rating settled");
        }
        Err(e) => {
            warn!(id = id, index = index, error = %e, "Rating already settled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::time::Duration;

    use crate::catalog::{CatalogService, Envelope, SearchPage, TitleDetail};
    use async_trait::async_trait;
    use reelscout_common::RatingState;
    use tokio::sync::Notify;

    /// Stub catalog with per-id ratings. Ids listed in `gated` wait for the
    /// shared `Notify` before answering.
    struct StubCatalog {
        ratings: HashMap<String, Option<String>>,
        gated: Vec<String>,
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl CatalogService for StubCatalog {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn search(&self, _query: &str) -> anyhow::Result<Envelope<SearchPage>> {
            Ok(Envelope::Failed { reason: None })
        }

        async fn lookup(&self, id: &str) -> anyhow::Result<Envelope<TitleDetail>> {
            if self.gated.iter().any(|g| g == id) {
                self.gate.notified().await;
            }
            match self.ratings.get(id) {
                Some(Some(rating)) => Ok(Envelope::Found(TitleDetail {
                    id: Some(id.to_string()),
                    title: None,
                    rating: Some(rating.clone()),
                })),
                Some(None) => Ok(Envelope::failed("Incorrect IMDb ID.")),
                None => Err(anyhow::anyhow!("connection refused")),
            }
        }
    }

    fn results(n: usize) -> Vec<SearchResult> {
        (0..n)
            .map(|i| SearchResult {
                id: format!("tt{i}"),
                title: Some(format!("Movie {i}")),
                year: Some("2000".to_string()),
                poster_url: Some("N/A".to_string()),
            })
            .collect()
    }

    fn renderer(catalog: StubCatalog) -> (Arc<ResultsView>, Renderer) {
        let view = ResultsView::new();
        let resolver = RatingResolver::new(Arc::new(catalog));
        let renderer = Renderer::new(view.clone(), resolver, DEFAULT_MAX_RESULTS);
        (view, renderer)
    }

    fn all_rated(n: usize) -> StubCatalog {
        StubCatalog {
            ratings: (0..n).map(|i| (format!("tt{i}"), Some(format!("{i}.0")))).collect(),
            gated: Vec::new(),
            gate: Arc::new(Notify::new()),
        }
    }

    #[tokio::test]
    async fn empty_input_shows_placeholder() {
        let (view, renderer) = renderer(all_rated(0));
        let tasks = renderer.render(Vec::new());
        assert!(tasks.is_empty());
        assert!(view.snapshot().shows_no_results());
    }

    #[tokio::test]
    async fn render_for_superseded_generation_is_a_no_op() {
        let (view, renderer) = renderer(all_rated(2));
        let claimed = view.clear_grid();
        let newer = view.clear_grid();
        renderer.render(results(1)).wait().await;
        let current = view.generation();
        assert!(current > newer);

        let tasks = renderer.render_for(claimed, results(2));
        assert!(tasks.is_empty());
        assert_eq!(tasks.generation(), claimed);
        assert_eq!(view.generation(), current);
        assert_eq!(view.snapshot().cards().len(), 1);
    }

    #[tokio::test]
    async fn cards_start_pending_and_truncate_to_cap() {
        let (view, renderer) = renderer(all_rated(15));

        // Spawned tasks cannot run before the next await on this runtime.
        let tasks = renderer.render(results(15));
        assert_eq!(tasks.len(), 10);

        let snap = view.snapshot();
        assert_eq!(snap.cards().len(), 10);
        assert!(snap.cards().iter().all(|c| c.rating.is_pending()));
        assert!(snap.cards().iter().all(|c| c.poster.is_fallback()));
        assert_eq!(snap.cards()[9].result.id, "tt9");

        tokio::time::timeout(Duration::from_secs(5), tasks.wait())
            .await
            .expect("Timed out waiting for enrichment");

        let snap = view.snapshot();
        for card in snap.cards() {
            assert_eq!(card.rating, RatingState::Resolved(format!("{}.0", card.index)));
        }
    }

    #[tokio::test]
    async fn failures_only_affect_their_own_card() {
        let mut catalog = all_rated(3);
        catalog.ratings.insert("tt1".to_string(), None);
        catalog.ratings.remove("tt2");
        let (view, renderer) = renderer(catalog);

        renderer.render(results(3)).wait().await;

        let snap = view.snapshot();
        assert_eq!(snap.cards()[0].rating, RatingState::Resolved("0.0".into()));
        assert_eq!(snap.cards()[1].rating, RatingState::Unavailable);
        assert_eq!(snap.cards()[2].rating, RatingState::Unavailable);
        assert_eq!(snap.cards()[2].rating_label(), "IMDb-betyg: —/10");
    }

    #[tokio::test]
    async fn stale_enrichment_does_not_patch_new_grid() {
        let gate = Arc::new(Notify::new());
        let catalog = StubCatalog {
            gated: vec!["tt0".to_string()],
            gate: gate.clone(),
            ..all_rated(2)
        };
        let (view, renderer) = renderer(catalog);

        let stale = renderer.render(results(1));
        // Let the stale task reach the gate before superseding it.
        tokio::task::yield_now().await;

        let fresh_results = vec![SearchResult {
            id: "tt1".to_string(),
            title: Some("Fresh".to_string()),
            year: None,
            poster_url: None,
        }];
        // The fresh card reuses index 0, which the stale task also targets.
        renderer.render(fresh_results).wait().await;
        assert_eq!(view.snapshot().cards()[0].rating, RatingState::Resolved("1.0".into()));

        let release = tokio::spawn(async move {
            loop {
                gate.notify_waiters();
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        });
        tokio::time::timeout(Duration::from_secs(5), stale.wait())
            .await
            .expect("Timed out waiting for stale enrichment");
        release.abort();

        let snap = view.snapshot();
        assert_eq!(snap.cards().len(), 1);
        assert_eq!(snap.cards()[0].result.id, "tt1");
        assert_eq!(snap.cards()[0].rating, RatingState::Resolved("1.0".into()));
    }
}
