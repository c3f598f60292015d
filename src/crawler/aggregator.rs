//! Result aggregation
//!
//! The aggregator is the single consumer of the result queue. It owns the combined
//! story list outright; workers only ever send values into the queue.
//!
//! Stories are appended in page *completion* order, which is not page order: workers
//! finish at different times. Callers that need page order must sort themselves.

use crate::crawler::job::{PageIndex, PageResult};
use crate::story::Story;
use crate::SweepError;
use tokio::sync::mpsc;

/// Final merged result of a multi-page run
#[derive(Debug, Default)]
pub struct AggregateOutcome {
    /// Stories of every successful page, in completion order
    pub stories: Vec<Story>,

    /// Number of pages that produced a result without error
    pub pages_succeeded: usize,

    /// Pages that failed, in the order their failures arrived
    pub failed_pages: Vec<PageIndex>,

    /// Pages abandoned because of cancellation (not failures)
    pub pages_cancelled: usize,

    /// True if the run observed cancellation before finishing
    pub interrupted: bool,

    /// Set when at least one page failed; carries only the failure count
    pub error: Option<SweepError>,
}

impl AggregateOutcome {
    /// Number of failed pages
    pub fn failures(&self) -> usize {
        self.failed_pages.len()
    }

    /// Number of page results the aggregator received
    pub fn pages_collected(&self) -> usize {
        self.pages_succeeded + self.failed_pages.len() + self.pages_cancelled
    }
}

/// Partitions page results into stories and failures
#[derive(Debug, Default)]
pub struct Aggregator {
    stories: Vec<Story>,
    pages_succeeded: usize,
    failed_pages: Vec<PageIndex>,
    pages_cancelled: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains `results` until every sender is gone, then finishes
    pub async fn collect(mut results: mpsc::Receiver<PageResult>) -> AggregateOutcome {
        let mut aggregator = Self::new();
        while let Some(result) = results.recv().await {
            aggregator.record(result);
        }
        aggregator.finish()
    }

    /// Folds one page result into the aggregate
    pub fn record(&mut self, result: PageResult) {
        let page = result.page;
        match result.outcome {
            Ok(stories) => {
                tracing::debug!("Page {} yielded {} stories", page, stories.len());
                self.pages_succeeded += 1;
                self.stories.extend(stories);
            }
            Err(error) if error.is_cancellation() => {
                tracing::debug!("Page {} was cancelled", page);
                self.pages_cancelled += 1;
            }
            Err(error) => {
                tracing::warn!("Page {} failed: {}", page, error);
                self.failed_pages.push(page);
            }
        }
    }

    pub fn finish(self) -> AggregateOutcome {
        let failures = self.failed_pages.len();
        AggregateOutcome {
            stories: self.stories,
            pages_succeeded: self.pages_succeeded,
            failed_pages: self.failed_pages,
            pages_cancelled: self.pages_cancelled,
            interrupted: false,
            error: (failures > 0).then_some(SweepError::Aggregate { failures }),
        }
    }
}
