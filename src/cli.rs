use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelscout")]
#[command(author, version, about = "Movie catalog search with progressive rating enrichment")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the final view as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog and show the results with their ratings
    Search {
        /// Search term (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Show the start page: the start term under the static heading
    Start,

    /// Run a preset shortcut by label or term
    Preset {
        /// Preset label or term
        name: String,
    },

    /// List configured preset shortcuts
    Presets,

    /// Interactive session: one search per line, `:N` runs preset N, `:q` quits
    Browse,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses --config or defaults if not specified)
        #[arg(value_name = "CONFIG")]
        path: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
