//! Crawler module for listing page fetching and processing
//!
//! This module contains the core concurrent pipeline, including:
//! - HTTP fetching with a per-request timeout and cancellation
//! - A narrow document abstraction and the story extractor built on it
//! - The per-page job (page index -> URL -> stories or error)
//! - The bounded worker pool and the result aggregator

mod aggregator;
mod document;
mod extractor;
mod fetcher;
mod job;
mod pool;

pub use aggregator::{AggregateOutcome, Aggregator};
pub use document::{Document, HtmlDocument, Node};
pub use extractor::{leading_number, resolve_story_url, Extractor};
pub use fetcher::{build_http_client, Fetcher};
pub use job::{ListingSite, PageIndex, PageJob, PageResult};
pub use pool::{WorkerPool, DEFAULT_POLITENESS_DELAY};

use crate::config::{validate, Config};
use crate::SweepError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Runs a complete multi-page sweep
///
/// This is the main entry point. It will:
/// 1. Validate the configuration (no network I/O happens if this fails)
/// 2. Build the shared HTTP client and the extractor
/// 3. Run the worker pool over pages `1..=config.scrape.pages`
/// 4. Return the aggregate of every page result
///
/// Per-page failures do not make this function fail; they are reported through
/// [`AggregateOutcome::error`].
///
/// # Example
///
/// ```no_run
/// use hn_sweep::config::Config;
/// use hn_sweep::crawler::sweep;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = sweep(&Config::default(), CancellationToken::new()).await?;
/// println!("{} stories", outcome.stories.len());
/// # Ok(())
/// # }
/// ```
pub async fn sweep(
    config: &Config,
    cancel: CancellationToken,
) -> Result<AggregateOutcome, SweepError> {
    validate(config)?;

    tracing::debug!(
        "Starting sweep with config: pages={}, workers={}, timeout={}s",
        config.scrape.pages,
        config.scrape.workers,
        config.scrape.timeout_secs
    );

    let job = Arc::new(PageJob::from_config(config)?);
    let pool = WorkerPool::new(job, config.scrape.workers as usize)
        .with_politeness_delay(Duration::from_millis(config.scrape.politeness_delay_ms));

    let start = Instant::now();
    let outcome = pool.run(config.scrape.pages, cancel).await;

    tracing::debug!(
        "scraping completed in {:?}, found {} stories",
        start.elapsed(),
        outcome.stories.len()
    );

    Ok(outcome)
}
