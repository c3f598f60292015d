//! HN-Sweep: a concurrent listing-page scraper
//!
//! This crate fetches the paginated listing pages of a news site, extracts the
//! stories on every page and merges the per-page results, fetching pages through a
//! bounded pool of workers that honors cancellation.

pub mod config;
pub mod crawler;
pub mod output;
pub mod shutdown;
pub mod state;
pub mod story;

use thiserror::Error;

/// Main error type for HN-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// One or more pages failed; only the count survives aggregation
    #[error("encountered {failures} error(s) during scraping")]
    Aggregate { failures: usize },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while fetching a single listing page
///
/// These never cross the worker boundary as faults: they are carried inside a
/// [`crawler::PageResult`] and counted by the aggregator.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to fetch {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("request timeout for {url}")]
    Timeout { url: String },

    #[error("bad status code for {url}: {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read document from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("request cancelled for {url}")]
    Cancelled { url: String },
}

impl PageError {
    /// Returns true if the page was abandoned because of cancellation
    ///
    /// Cancelled pages are not failures for aggregation purposes.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// The URL of the page that failed
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. }
            | Self::Timeout { url }
            | Self::Status { url, .. }
            | Self::Parse { url, .. }
            | Self::Cancelled { url } => url,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for HN-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{sweep, AggregateOutcome, PageIndex, PageResult};
pub use state::WorkerState;
pub use story::Story;
