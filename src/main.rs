mod cli;

use reelscout::{
    config::{self, Config},
    view::text::{format_event, format_snapshot},
    MovieBrowser,
};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::future::Future;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "reelscout=debug,reelscout_common=debug".to_string()
        } else {
            "reelscout=info".to_string()
        }
    });

    // Logs go to stderr; stdout carries the view.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let json = cli.json;

    match cli.command {
        Commands::Search { query } => {
            let config = config::load_config_or_default(config_path)?;
            block_on(search(config, query.join(" "), json))
        }
        Commands::Start => {
            let config = config::load_config_or_default(config_path)?;
            block_on(start(config, json))
        }
        Commands::Preset { name } => {
            let config = config::load_config_or_default(config_path)?;
            let term = match config.find_preset(&name) {
                Some(preset) => preset.term.clone(),
                None => anyhow::bail!("Unknown preset: {}", name),
            };
            block_on(search(config, term, json))
        }
        Commands::Presets => {
            let config = config::load_config_or_default(config_path)?;
            list_presets(&config);
            Ok(())
        }
        Commands::Browse => {
            let config = config::load_config_or_default(config_path)?;
            block_on(browse(config))
        }
        Commands::Validate { path } => {
            let path = path.or_else(|| cli.config.clone());
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("reelscout {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn block_on<F: Future<Output = Result<()>>>(future: F) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(future)
}

fn print_view(browser: &MovieBrowser, json: bool) -> Result<()> {
    let snapshot = browser.view().snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", format_snapshot(&snapshot));
    }
    Ok(())
}

async fn search(config: Config, query: String, json: bool) -> Result<()> {
    let browser = MovieBrowser::from_config(&config);

    match browser.submit(&query).await {
        Some(tasks) => tasks.wait().await,
        None => {
            eprintln!("Nothing to search for");
            return Ok(());
        }
    }

    print_view(&browser, json)
}

async fn start(config: Config, json: bool) -> Result<()> {
    let browser = MovieBrowser::from_config(&config);

    if let Some(tasks) = browser.start().await {
        tasks.wait().await;
    }

    print_view(&browser, json)
}

fn list_presets(config: &Config) {
    if config.presets.is_empty() {
        println!("No presets configured");
        return;
    }
    for (i, preset) in config.presets.iter().enumerate() {
        println!(":{} {} ({})", i + 1, preset.label, preset.term);
    }
}

async fn browse(config: Config) -> Result<()> {
    let browser = MovieBrowser::from_config(&config);

    let mut events = browser.view().subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Some(line) = format_event(&event) {
                        println!("{line}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    list_presets(&config);
    // Enrichment keeps running in the background while the user types.
    let _ = browser.start().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            ":q" | ":quit" => break,
            cmd if cmd.starts_with(':') => {
                let preset = cmd[1..]
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| config.presets.get(i));
                match preset {
                    Some(preset) => {
                        println!("> {}", preset.term);
                        let _ = browser.preset(&preset.term).await;
                    }
                    None => eprintln!("Unknown preset: {cmd}"),
                }
            }
            input => {
                let _ = browser.submit(input).await;
            }
        }
    }

    printer.abort();
    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Catalog: {}", config.catalog.base_url);
            println!(
                "  API key: {}",
                if config.catalog.api_key.is_empty() {
                    "missing"
                } else {
                    "set"
                }
            );
            println!("  Max results: {}", config.display.max_results);
            println!("  Start term: {}", config.display.start_term);
            println!("  Presets: {}", config.presets.len());
        }
        None => {
            println!("No config file specified, using defaults");
            let config = Config::default();
            println!("Default config:");
            println!("  Catalog: {}", config.catalog.base_url);
            println!("  Max results: {}", config.display.max_results);
        }
    }

    Ok(())
}
