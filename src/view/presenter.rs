//! Status line and heading setters.

use std::fmt::Display;
use std::sync::Arc;

use super::ResultsView;

/// Heading shown on initial load.
pub const START_TITLE: &str = "Utvalda julfilmer:";

/// Writes the status line and heading of a [`ResultsView`]. Last write wins.
#[derive(Clone)]
pub struct Presenter {
    view: Arc<ResultsView>,
}

impl Presenter {
    pub fn new(view: Arc<ResultsView>) -> Self {
        Self { view }
    }

    pub fn set_status(&self, message: &str) {
        self.view.set_status(message);
    }

    /// Heading for a titled search. `count` is displayed as given.
    pub fn set_results_title(&self, count: impl Display) {
        self.view.set_title(&format!("Träffar: {count}"));
    }

    pub fn set_start_title(&self) {
        self.view.set_title(START_TITLE);
    }
}
