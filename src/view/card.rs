//! Display units (result cards) and their label texts.

use reelscout_common::encode::encode_component;
use reelscout_common::{RatingState, SearchResult};
use serde::{Deserialize, Serialize};

/// Shown when a result has no title.
pub const UNKNOWN_TITLE: &str = "Okänd titel";

/// Placeholder glyph for missing years and unavailable ratings.
pub const MISSING_GLYPH: &str = "—";

/// Placeholder shown while a rating lookup is outstanding.
pub const PENDING_GLYPH: &str = "…";

const POSTER_FALLBACK_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="450">
  <rect width="100%" height="100%" fill="rgba(255,255,255,0.08)"/>
  <text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle"
    fill="rgba(255,255,255,0.6)" font-family="Arial" font-size="18">Saknar bild</text>
</svg>"#;

/// Generated placeholder poster as an SVG `data:` URI.
pub fn poster_fallback() -> String {
    format!(
        "data:image/svg+xml;charset=utf-8,{}",
        encode_component(POSTER_FALLBACK_SVG)
    )
}

/// Where a card's poster image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "src", rename_all = "snake_case")]
pub enum PosterSource {
    Remote(String),
    Fallback(String),
}

impl PosterSource {
    pub fn for_result(result: &SearchResult) -> Self {
        match result.usable_poster() {
            Some(url) => Self::Remote(url.to_string()),
            None => Self::Fallback(poster_fallback()),
        }
    }

    /// Image source regardless of origin.
    pub fn src(&self) -> &str {
        match self {
            Self::Remote(src) | Self::Fallback(src) => src,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// One rendered result card.
///
/// `rating` is the only field that changes after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUnit {
    /// Position in the grid, starting at 0.
    pub index: usize,
    pub result: SearchResult,
    pub poster: PosterSource,
    pub alt: String,
    pub rating: RatingState,
}

impl DisplayUnit {
    /// Build a card in the pending state.
    pub fn new(index: usize, result: SearchResult) -> Self {
        let poster = PosterSource::for_result(&result);
        let alt = match result.title.as_deref().filter(|t| !t.is_empty()) {
            Some(title) => format!("Poster: {title}"),
            None => "Poster".to_string(),
        };
        Self {
            index,
            result,
            poster,
            alt,
            rating: RatingState::Pending,
        }
    }

    pub fn title_label(&self) -> &str {
        self.result
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TITLE)
    }

    pub fn year_label(&self) -> String {
        let year = self
            .result
            .year
            .as_deref()
            .filter(|y| !y.is_empty())
            .unwrap_or(MISSING_GLYPH);
        format!("År: {year}")
    }

    pub fn rating_label(&self) -> String {
        rating_label(&self.rating)
    }
}

/// Card text for a rating state.
pub fn rating_label(rating: &RatingState) -> String {
    let value = match rating {
        RatingState::Pending => PENDING_GLYPH,
        RatingState::Resolved(value) => value.as_str(),
        RatingState::Unavailable => MISSING_GLYPH,
    };
    format!("IMDb-betyg: {value}/10")
}
