use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default = "default_presets")]
    pub presets: Vec<Preset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            display: DisplayConfig::default(),
            presets: default_presets(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Base URL of the OMDb-compatible catalog service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Access token passed as the `apikey` query parameter
    #[serde(default)]
    pub api_key: String,

    /// Value of the `type` filter on keyword searches
    #[serde(default = "default_media_type")]
    pub media_type: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}
fn default_media_type() -> String {
    "movie".to_string()
}
fn default_timeout() -> u64 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            media_type: default_media_type(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Maximum number of cards rendered per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Term searched on initial load
    #[serde(default = "default_start_term")]
    pub start_term: String,
}

fn default_max_results() -> usize {
    10
}
fn default_start_term() -> String {
    "christmas".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            start_term: default_start_term(),
        }
    }
}

/// A shortcut that runs a fixed search term.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Preset {
    pub label: String,
    pub term: String,
}

impl Preset {
    pub fn new(label: &str, term: &str) -> Self {
        Self {
            label: label.to_string(),
            term: term.to_string(),
        }
    }

    /// Matches on label (case-insensitive) or on the exact term.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.label.eq_ignore_ascii_case(name) || self.term == name
    }
}

fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new("Christmas", "christmas"),
        Preset::new("Grinch", "grinch"),
        Preset::new("Home Alone", "home alone"),
        Preset::new("Elf", "elf"),
        Preset::new("Santa", "santa"),
    ]
}

impl Config {
    /// Look up a preset by its label or term.
    pub fn find_preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.matches(name))
    }
}
