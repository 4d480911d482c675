//! In-memory display surface: status line, heading, and result grid.
//!
//! [`ResultsView`] is the single piece of shared mutable state. The
//! [`Presenter`] writes the status line and heading, the [`Renderer`] owns the
//! grid, and front ends observe changes through [`ViewEvent`]s broadcast on
//! every write.
//!
//! Every grid reset bumps the view's [`Generation`]. Card inserts and rating
//! patches carry the generation they were produced under and are dropped if it
//! is no longer current, so work left over from an earlier search can never
//! touch the cards of a later one.

pub mod card;
pub mod presenter;
pub mod renderer;
pub mod text;

pub use card::{DisplayUnit, PosterSource};
pub use presenter::Presenter;
pub use renderer::{EnrichmentTasks, Renderer};

use std::sync::Arc;

use parking_lot::RwLock;
use reelscout_common::{Generation, RatingState};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 256;

/// Contents of the result grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "cards", rename_all = "snake_case")]
pub enum Grid {
    /// Nothing rendered (initial state, or cleared while loading).
    #[default]
    Empty,
    /// The single "no results" placeholder.
    NoResults,
    /// Result cards in insertion order.
    Cards(Vec<DisplayUnit>),
}

/// A change to the view.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewEvent {
    StatusChanged {
        message: String,
    },
    TitleChanged {
        title: String,
    },
    GridCleared {
        generation: Generation,
    },
    NoResultsShown {
        generation: Generation,
    },
    CardInserted {
        generation: Generation,
        unit: DisplayUnit,
    },
    RatingPatched {
        generation: Generation,
        index: usize,
        rating: RatingState,
    },
}

/// Point-in-time copy of the whole view.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub status: String,
    pub title: String,
    pub generation: Generation,
    pub grid: Grid,
}

impl ViewSnapshot {
    /// Cards currently in the grid (empty for the placeholder states).
    pub fn cards(&self) -> &[DisplayUnit] {
        match &self.grid {
            Grid::Cards(units) => units,
            Grid::Empty | Grid::NoResults => &[],
        }
    }

    pub fn shows_no_results(&self) -> bool {
        matches!(self.grid, Grid::NoResults)
    }
}

/// What happened to a rating patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The card's rating was settled.
    Applied,
    /// A newer search has replaced the grid; the patch was discarded.
    Superseded,
    /// The generation is current but no card has that index.
    Missing,
}

#[derive(Debug, Default)]
struct ViewState {
    status: String,
    title: String,
    generation: Generation,
    grid: Grid,
}

pub struct ResultsView {
    state: RwLock<ViewState>,
    event_tx: broadcast::Sender<ViewEvent>,
}

impl ResultsView {
    pub fn new() -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            state: RwLock::new(ViewState::default()),
            event_tx,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.event_tx.subscribe()
    }

    fn broadcast(&self, event: ViewEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::trace!("No subscribers for view event");
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.state.read();
        ViewSnapshot {
            status: state.status.clone(),
            title: state.title.clone(),
            generation: state.generation,
            grid: state.grid.clone(),
        }
    }

    pub fn status(&self) -> String {
        self.state.read().status.clone()
    }

    pub fn title(&self) -> String {
        self.state.read().title.clone()
    }

    pub fn generation(&self) -> Generation {
        self.state.read().generation
    }

    pub(crate) fn set_status(&self, message: &str) {
        let mut state = self.state.write();
        state.status = message.to_string();
        self.broadcast(ViewEvent::StatusChanged {
            message: message.to_string(),
        });
    }

    pub(crate) fn set_title(&self, title: &str) {
        let mut state = self.state.write();
        state.title = title.to_string();
        self.broadcast(ViewEvent::TitleChanged {
            title: title.to_string(),
        });
    }

    /// Empty the grid and start a new generation.
    pub(crate) fn clear_grid(&self) -> Generation {
        let mut state = self.state.write();
        state.generation = state.generation.next();
        state.grid = Grid::Empty;
        let generation = state.generation;
        self.broadcast(ViewEvent::GridCleared { generation });
        generation
    }

    /// Like [`clear_grid`](Self::clear_grid), but only while `generation` is
    /// still current. Returns the new generation, or `None` if superseded.
    pub(crate) fn clear_grid_after(&self, generation: Generation) -> Option<Generation> {
        let mut state = self.state.write();
        if state.generation != generation {
            return None;
        }
        state.generation = state.generation.next();
        state.grid = Grid::Empty;
        let generation = state.generation;
        self.broadcast(ViewEvent::GridCleared { generation });
        Some(generation)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.state.read().generation == generation
    }

    /// Replace the grid with the "no results" placeholder.
    ///
    /// Returns `false` if `generation` has been superseded.
    pub(crate) fn show_no_results(&self, generation: Generation) -> bool {
        let mut state = self.state.write();
        if state.generation != generation {
            return false;
        }
        state.grid = Grid::NoResults;
        self.broadcast(ViewEvent::NoResultsShown { generation });
        true
    }

    /// Append a card. Returns `false` if `generation` has been superseded.
    pub(crate) fn insert_card(&self, generation: Generation, unit: DisplayUnit) -> bool {
        let mut state = self.state.write();
        if state.generation != generation {
            return false;
        }
        match &mut state.grid {
            Grid::Cards(units) => units.push(unit.clone()),
            grid => *grid = Grid::Cards(vec![unit.clone()]),
        }
        self.broadcast(ViewEvent::CardInserted { generation, unit });
        true
    }

    /// Settle the rating of card `index` if `generation` is still current.
    ///
    /// Fails only when the card's rating has already settled.
    pub(crate) fn patch_rating(
        &self,
        generation: Generation,
        index: usize,
        rating: Option<String>,
    ) -> reelscout_common::Result<PatchOutcome> {
        let mut state = self.state.write();
        if state.generation != generation {
            return Ok(PatchOutcome::Superseded);
        }
        let Grid::Cards(units) = &mut state.grid else {
            return Ok(PatchOutcome::Missing);
        };
        let Some(unit) = units.iter_mut().find(|u| u.index == index) else {
            return Ok(PatchOutcome::Missing);
        };

        unit.rating = unit.rating.settle(rating)?;
        self.broadcast(ViewEvent::RatingPatched {
            generation,
            index,
            rating: unit.rating.clone(),
        });
        Ok(PatchOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use reelscout_common::{Error, SearchResult};

    fn unit(index: usize) -> DisplayUnit {
        DisplayUnit::new(
            index,
            SearchResult {
                id: format!("tt{index}"),
                title: Some(format!("Movie {index}")),
                year: Some("2001".to_string()),
                poster_url: None,
            },
        )
    }

    #[test]
    fn setters_last_write_wins() {
        let view = ResultsView::new();
        view.set_status("Hämtar...");
        view.set_status("");
        view.set_title("Träffar: 3");
        view.set_title("Träffar: 4");
        assert_eq!(view.status(), "");
        assert_eq!(view.title(), "Träffar: 4");
    }

    #[test]
    fn clear_grid_bumps_generation() {
        let view = ResultsView::new();
        let first = view.clear_grid();
        let second = view.clear_grid();
        assert!(second > first);
        assert_eq!(view.generation(), second);
    }

    #[test]
    fn insert_and_patch_current_generation() {
        let view = ResultsView::new();
        let generation = view.clear_grid();
        assert!(view.insert_card(generation, unit(0)));
        assert!(view.insert_card(generation, unit(1)));

        let outcome = view.patch_rating(generation, 1, Some("7.5".into())).unwrap();
        assert_eq!(outcome, PatchOutcome::Applied);

        let snap = view.snapshot();
        assert_eq!(snap.cards().len(), 2);
        assert!(snap.cards()[0].rating.is_pending());
        assert_eq!(snap.cards()[1].rating, RatingState::Resolved("7.5".into()));
    }

    #[test]
    fn second_patch_is_rejected() {
        let view = ResultsView::new();
        let generation = view.clear_grid();
        view.insert_card(generation, unit(0));
        view.patch_rating(generation, 0, None).unwrap();

        let err = view.patch_rating(generation, 0, Some("9.0".into())).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
        assert_eq!(view.snapshot().cards()[0].rating, RatingState::Unavailable);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let view = ResultsView::new();
        let old = view.clear_grid();
        view.insert_card(old, unit(0));

        let new = view.clear_grid();
        view.insert_card(new, unit(0));

        assert!(!view.insert_card(old, unit(1)));
        assert!(!view.show_no_results(old));
        assert_eq!(
            view.patch_rating(old, 0, Some("1.0".into())).unwrap(),
            PatchOutcome::Superseded
        );
        assert!(view.snapshot().cards()[0].rating.is_pending());
        assert_eq!(view.snapshot().cards().len(), 1);
    }

    #[test]
    fn clear_grid_after_requires_current_generation() {
        let view = ResultsView::new();
        let first = view.clear_grid();
        let second = view.clear_grid();

        assert!(!view.is_current(first));
        assert_eq!(view.clear_grid_after(first), None);
        assert_eq!(view.generation(), second);

        let third = view.clear_grid_after(second).unwrap();
        assert!(third > second);
        assert!(view.is_current(third));
    }

    #[test]
    fn patch_without_cards_is_missing() {
        let view = ResultsView::new();
        let generation = view.clear_grid();
        assert_eq!(
            view.patch_rating(generation, 0, None).unwrap(),
            PatchOutcome::Missing
        );
        assert!(view.show_no_results(generation));
        assert!(view.snapshot().shows_no_results());
    }

    #[tokio::test]
    async fn subscribers_see_events_in_order() {
        let view = ResultsView::new();
        let mut rx = view.subscribe();

        view.set_status("Hämtar...");
        let generation = view.clear_grid();
        view.insert_card(generation, unit(0));

        assert!(matches!(rx.recv().await.unwrap(), ViewEvent::StatusChanged { .. }));
        assert!(matches!(rx.recv().await.unwrap(), ViewEvent::GridCleared { .. }));
        match rx.recv().await.unwrap() {
            ViewEvent::CardInserted { unit, .. } => assert_eq!(unit.index, 0),
            other => panic!("Expected CardInserted, got: {:?}", other),
        }
    }
}
