//! Search orchestration: user input in, view updates out.
//!
//! [`MovieBrowser`] wires the [`QueryExecutor`], the [`Renderer`] and the
//! [`Presenter`] around a shared [`ResultsView`] and exposes the three entry
//! points a front end needs: a typed submission, a preset shortcut, and the
//! initial load.
//!
//! # Example
//!
//! ```rust,ignore
//! let browser = MovieBrowser::from_config(&config);
//! if let Some(tasks) = browser.submit("home alone").await {
//!     tasks.wait().await;
//! }
//! println!("{}", format_snapshot(&browser.view().snapshot()));
//! ```

use std::sync::Arc;

use reelscout_common::{QueryOutcome, SearchQuery};
use tracing::{debug, info};

use crate::catalog::{CatalogService, OmdbClient};
use crate::config::{Config, DisplayConfig};
use crate::enrichment::RatingResolver;
use crate::search::{QueryExecutor, NO_RESULTS_MESSAGE};
use crate::view::{EnrichmentTasks, Presenter, Renderer, ResultsView};

/// Status shown while a search is in flight.
pub const LOADING_MESSAGE: &str = "Hämtar...";

/// Status shown when the catalog could not be reached or understood.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Något gick fel (nätverk/API-nyckel).";

pub struct MovieBrowser {
    executor: QueryExecutor,
    renderer: Renderer,
    presenter: Presenter,
    view: Arc<ResultsView>,
    start_term: String,
}

impl MovieBrowser {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        view: Arc<ResultsView>,
        display: &DisplayConfig,
    ) -> Self {
        let executor = QueryExecutor::new(Arc::clone(&catalog));
        let resolver = RatingResolver::new(catalog);
        let renderer = Renderer::new(Arc::clone(&view), resolver, display.max_results);
        let presenter = Presenter::new(Arc::clone(&view));

        Self {
            executor,
            renderer,
            presenter,
            view,
            start_term: display.start_term.clone(),
        }
    }

    /// Build a browser backed by the OMDb client described in `config`.
    pub fn from_config(config: &Config) -> Self {
        let catalog: Arc<dyn CatalogService> = Arc::new(OmdbClient::new(&config.catalog));
        Self::new(catalog, ResultsView::new(), &config.display)
    }

    pub fn view(&self) -> &Arc<ResultsView> {
        &self.view
    }

    /// Handle a typed submission.
    ///
    /// Blank input is ignored: nothing is searched and the view is untouched.
    pub async fn submit(&self, input: &str) -> Option<EnrichmentTasks> {
        let query = match SearchQuery::new(input) {
            Ok(query) => query,
            Err(e) => {
                debug!(error = %e, "Ignoring submission");
                return None;
            }
        };
        Some(self.search_movies(&query, false).await)
    }

    /// Handle a preset shortcut. Same path as a typed submission.
    pub async fn preset(&self, term: &str) -> Option<EnrichmentTasks> {
        self.submit(term).await
    }

    /// Initial load: static heading, then the start term without a hit count.
    pub async fn start(&self) -> Option<EnrichmentTasks> {
        self.presenter.set_start_title();
        let query = match SearchQuery::new(&self.start_term) {
            Ok(query) => query,
            Err(e) => {
                debug!(error = %e, "No start term configured");
                return None;
            }
        };
        Some(self.search_movies(&query, true).await)
    }

    /// Run one search and render its outcome.
    ///
    /// With `is_start` set the heading is left alone. If another search
    /// starts while this one is waiting on the catalog, this one's outcome
    /// is dropped and the view is not touched again.
    pub async fn search_movies(&self, query: &SearchQuery, is_start: bool) -> EnrichmentTasks {
        self.presenter.set_status(LOADING_MESSAGE);
        // Invalidate the previous search's cards right away.
        let generation = self.view.clear_grid();

        let outcome = self.executor.search(query).await;
        if !self.view.is_current(generation) {
            debug!(query = %query, generation = %generation, "Discarding superseded search outcome");
            return EnrichmentTasks::empty(generation);
        }

        match outcome {
            QueryOutcome::Empty { reason } => {
                if !is_start {
                    self.presenter.set_results_title(0);
                }
                self.presenter.set_status(&reason);
                self.renderer.render_for(generation, Vec::new())
            }
            QueryOutcome::Success { items, total } => {
                if !is_start {
                    self.presenter.set_results_title(&total);
                }
                let status = if items.is_empty() { NO_RESULTS_MESSAGE } else { "" };
                self.presenter.set_status(status);
                info!(query = %query, total = %total, received = items.len(), "Rendering results");
                self.renderer.render_for(generation, items)
            }
            QueryOutcome::TransportFailure => {
                self.presenter.set_status(TRANSPORT_FAILURE_MESSAGE);
                self.renderer.render_for(generation, Vec::new())
            }
        }
    }
}
