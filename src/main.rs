//! URL rewriter CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   config.toml ──▶ config::loader ──▶ RewriterConfig
//!                                           │
//!   router.json ──▶ config::loader ──▶ RouteMapping ──▶ RewriterStore (base)
//!   custom.json ──▶ config::loader ──▶ RouteMapping ──▶ Rewriter (override)
//!                                           │
//!   URL ──────────────────────────────▶ RouteScope ──▶ rewritten URL
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use url_rewriter::config::watcher::MappingWatcher;
use url_rewriter::config::{load_config_with_overrides, load_mappings};
use url_rewriter::observability::{logging, metrics};
use url_rewriter::{Rewriter, RewriterStore};

#[derive(Parser)]
#[command(name = "url-rewriter")]
#[command(about = "Rewrite URLs between pretty paths and application routes", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base mapping file (overrides the config value).
    #[arg(short, long)]
    mapping: Option<PathBuf>,

    /// Override mapping file, consulted first (overrides the config value).
    #[arg(short = 'o', long = "override")]
    override_mapping: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite pretty URLs into application routes
    Get { urls: Vec<String> },
    /// Rewrite application routes back into pretty URLs
    Reverse { urls: Vec<String> },
    /// Rewrite URLs read line by line from stdin
    Stdin {
        #[arg(short, long)]
        reverse: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config =
        load_config_with_overrides(cli.config.as_deref(), cli.mapping, cli.override_mapping)?;

    logging::init_logging(&config.logging)?;
    metrics::describe_metrics();

    let (base, custom) = load_mappings(&config)?;
    let store = Arc::new(RewriterStore::from_mapping(&base)?);
    let custom = custom
        .as_ref()
        .map(Rewriter::from_mapping)
        .transpose()?
        .map(Arc::new);

    tracing::info!(
        mapping = ?config.mapping_path,
        override_mapping = ?config.override_path,
        entries = base.len(),
        "Routes compiled"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Get { urls } => {
            let scope = store.scope(custom);
            for url in urls {
                writeln!(out, "{}", scope.get(&url))?;
            }
        }
        Commands::Reverse { urls } => {
            let scope = store.scope(custom);
            for url in urls {
                writeln!(out, "{}", scope.get_reverse(&url))?;
            }
        }
        Commands::Stdin { reverse } => {
            // Kept alive for the duration of the loop.
            let _watcher = match (&config.mapping_path, config.watch) {
                (Some(path), true) => Some(MappingWatcher::new(path, Arc::clone(&store)).run()?),
                _ => None,
            };

            for line in io::stdin().lock().lines() {
                let line = line?;
                let url = line.trim();
                if url.is_empty() {
                    continue;
                }
                // One scope per line, so reloads apply to the next URL.
                let scope = store.scope(custom.clone());
                let rewritten = if reverse {
                    scope.get_reverse(url)
                } else {
                    scope.get(url)
                };
                writeln!(out, "{rewritten}")?;
            }
        }
    }

    Ok(())
}
