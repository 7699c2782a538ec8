//! # Card Viewer CLI (`cards`)
//!
//! ## Usage
//!
//! ```bash
//! cards --config ./config/cards.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cards list` | Fetch and print all cards (or `--query` matches) |
//! | `cards watch` | Interactive debounced search over stdin |
//! | `cards export` | Write the rendered cards as a standalone HTML page |
//!
//! ## Examples
//!
//! ```bash
//! # Everything tagged or titled "weather"
//! cards list --query weather
//!
//! # Normalized cards as JSON
//! cards list --json
//!
//! # Work from a saved /api/cards response
//! cards --from-file ./cards.json export --output ./cards.html
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use card_viewer::config;
use card_viewer::http::HttpCardSource;
use card_viewer::{export, list, watch};
use card_viewer_core::source::memory::StaticCardSource;
use card_viewer_core::source::CardSource;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "./config/cards.toml";

/// Card Viewer CLI — fetch, normalize, render, and search evidence cards.
#[derive(Parser)]
#[command(
    name = "cards",
    about = "Card Viewer — fetch, render, and search evidence cards",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/cards.toml`; built-in defaults are used when
    /// that file does not exist.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Read a saved `/api/cards` response body instead of calling the API.
    #[arg(long, global = true)]
    from_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch cards once and print them.
    List {
        /// Only show cards whose claim, tags, or issue title contain this text.
        #[arg(long)]
        query: Option<String>,

        /// Print the normalized cards as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Interactive search: each stdin line replaces the query.
    ///
    /// A query still pending when stdin ends is applied before exiting.
    Watch,

    /// Write the rendered cards as a standalone HTML page.
    Export {
        /// Only include cards matching this text.
        #[arg(long)]
        query: Option<String>,

        /// Output file (stdout if omitted).
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Only the implicit default path may be absent.
    let cfg = if cli.config == Path::new(DEFAULT_CONFIG) {
        config::load_config_or_default(&cli.config)?
    } else {
        config::load_config(&cli.config)?
    };

    let source: Arc<dyn CardSource> = match &cli.from_file {
        Some(path) => {
            let body = std::fs::read(path)
                .with_context(|| format!("Failed to read cards file: {}", path.display()))?;
            Arc::new(StaticCardSource::from_body(body))
        }
        None => Arc::new(HttpCardSource::new(&cfg.api)?),
    };

    match cli.command {
        Commands::List { query, json } => {
            list::run_list(&cfg, source, query.as_deref(), json).await?;
        }
        Commands::Watch => {
            watch::run_watch(&cfg, source).await?;
        }
        Commands::Export { query, output } => {
            export::run_export(&cfg, source, query.as_deref(), output.as_deref()).await?;
        }
    }

    Ok(())
}
