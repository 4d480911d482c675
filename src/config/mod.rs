mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable that overrides `catalog.api_key`
pub const API_KEY_ENV: &str = "REELSCOUT_API_KEY";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./reelscout.toml",
        "./config.toml",
        "~/.config/reelscout/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    let mut config = Config::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config)?;
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
        config.catalog.api_key = key.trim().to_string();
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.catalog.base_url.trim().is_empty() {
        anyhow::bail!("Catalog base_url cannot be empty");
    }

    if config.catalog.timeout_secs == 0 {
        anyhow::bail!("Catalog timeout_secs cannot be 0");
    }

    if config.catalog.api_key.is_empty() {
        tracing::warn!(
            "No catalog API key configured; set catalog.api_key or {}",
            API_KEY_ENV
        );
    }

    if !(1..=100).contains(&config.display.max_results) {
        anyhow::bail!(
            "display.max_results must be between 1 and 100, got {}",
            config.display.max_results
        );
    }

    if config.display.start_term.trim().is_empty() {
        anyhow::bail!("display.start_term cannot be empty");
    }

    for preset in &config.presets {
        if preset.term.trim().is_empty() {
            anyhow::bail!("Preset '{}' has an empty search term", preset.label);
        }
    }

    Ok(())
}
