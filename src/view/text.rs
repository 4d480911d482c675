//! Plain-text rendering of the view for terminal front ends.

use std::fmt::Write;

use super::card::rating_label;
use super::{DisplayUnit, Grid, ViewEvent, ViewSnapshot};
use crate::search::NO_RESULTS_MESSAGE;

/// Format one card as a short block of lines.
pub fn format_card(unit: &DisplayUnit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", unit.index + 1, unit.title_label());
    let _ = writeln!(out, "    {}", unit.year_label());
    let _ = writeln!(out, "    {}", unit.rating_label());
    if unit.poster.is_fallback() {
        let _ = writeln!(out, "    Poster: (saknar bild)");
    } else {
        let _ = writeln!(out, "    Poster: {}", unit.poster.src());
    }
    out
}

/// Format the full view: heading, status line, then the grid.
pub fn format_snapshot(snapshot: &ViewSnapshot) -> String {
    let mut out = String::new();
    if !snapshot.title.is_empty() {
        let _ = writeln!(out, "{}", snapshot.title);
    }
    if !snapshot.status.is_empty() {
        let _ = writeln!(out, "{}", snapshot.status);
    }
    match &snapshot.grid {
        Grid::Empty => {}
        Grid::NoResults => {
            let _ = writeln!(out, "{NO_RESULTS_MESSAGE}");
        }
        Grid::Cards(units) => {
            for unit in units {
                out.push_str(&format_card(unit));
            }
        }
    }
    out
}

/// One-line description of an event, or `None` for events with nothing to show.
pub fn format_event(event: &ViewEvent) -> Option<String> {
    match event {
        ViewEvent::StatusChanged { message } if message.is_empty() => None,
        ViewEvent::StatusChanged { message } => Some(message.clone()),
        ViewEvent::TitleChanged { title } => Some(title.clone()),
        ViewEvent::GridCleared { .. } => None,
        ViewEvent::NoResultsShown { .. } => Some(NO_RESULTS_MESSAGE.to_string()),
        ViewEvent::CardInserted { unit, .. } => Some(
            format!("[{}] {} ({})", unit.index + 1, unit.title_label(), unit.year_label()),
        ),
        ViewEvent::RatingPatched { index, rating, .. } => {
            Some(format!("[{}] {}", index + 1, rating_label(rating)))
        }
    }
}
