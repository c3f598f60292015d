//! HN-Sweep main entry point
//!
//! This is the command-line interface for the HN-Sweep listing scraper.

use clap::Parser;
use hn_sweep::config::{load_config, parse_config, validate, Config};
use hn_sweep::crawler::sweep;
use hn_sweep::output::{render_stories, OutputFormat};
use hn_sweep::shutdown::listen_for_shutdown;
use hn_sweep::ConfigError;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// HN-Sweep: a concurrent listing-page scraper
///
/// Fetches the first N listing pages of Hacker News with a pool of workers,
/// extracts the stories on each page and prints them as a list or as JSON.
#[derive(Parser, Debug)]
#[command(name = "hn-sweep")]
#[command(version)]
#[command(about = "A concurrent listing-page scraper", long_about = None)]
struct Cli {
    /// Optional TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of pages to scrape (1-10) [default: 1]
    #[arg(short, long)]
    pages: Option<u32>,

    /// Number of concurrent workers (1-10) [default: 3]
    #[arg(short, long)]
    workers: Option<u32>,

    /// Output format [default: console]
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Request timeout in seconds [default: 30]
    #[arg(short, long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress non-error log output
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Whether any flag overrides a value from the config file
    fn has_overrides(&self) -> bool {
        self.pages.is_some()
            || self.workers.is_some()
            || self.output.is_some()
            || self.timeout.is_some()
            || self.verbose
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Invalid configuration exits before any network I/O
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run with --help for usage.");
            std::process::exit(1);
        }
    };

    setup_logging(config.output.verbose, cli.quiet);

    let cancel = CancellationToken::new();
    let listener = listen_for_shutdown(cancel.clone());

    let outcome = sweep(&config, cancel.clone()).await?;
    listener.abort();

    if outcome.interrupted {
        tracing::warn!(
            "Interrupted, rendering {} stories collected before shutdown",
            outcome.stories.len()
        );
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_stories(&outcome.stories, config.output.format, &mut out)?;

    if let Some(error) = &outcome.error {
        tracing::warn!("Warning: {}", error);
    }

    Ok(())
}

/// Merges the optional config file with command-line overrides and validates the result
fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) if !cli.has_overrides() => return load_config(path),
        Some(path) => parse_config(&std::fs::read_to_string(path)?)?,
        None => Config::default(),
    };

    if let Some(pages) = cli.pages {
        config.scrape.pages = pages;
    }
    if let Some(workers) = cli.workers {
        config.scrape.workers = workers;
    }
    if let Some(format) = cli.output {
        config.output.format = format;
    }
    if let Some(timeout) = cli.timeout {
        config.scrape.timeout_secs = timeout;
    }
    if cli.verbose {
        config.output.verbose = true;
    }

    validate(&config)?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber
///
/// Logs go to stderr so JSON on stdout stays machine-readable. `RUST_LOG` wins when set.
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else if verbose {
            EnvFilter::new("hn_sweep=debug,info")
        } else {
            EnvFilter::new("hn_sweep=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
