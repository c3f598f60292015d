//! Bounded worker pool for listing pages
//!
//! # Lifecycle
//!
//! 1. One job per page index `1..=pages` is enqueued, then the job queue is closed
//! 2. `workers` tasks pull jobs until the queue is exhausted or cancellation fires
//! 3. Each worker fetches, parses and emits one [`PageResult`] per job, then pauses
//!    for the politeness delay before pulling again
//! 4. A supervisor joins every worker and only then drops the last result sender,
//!    which closes the result queue
//! 5. The aggregator drains the result queue until it is closed
//!
//! Both queues are bounded to the page count, so neither side blocks for long.

use crate::crawler::aggregator::{AggregateOutcome, Aggregator};
use crate::crawler::job::{PageIndex, PageJob, PageResult};
use crate::state::WorkerState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Pause after each page before a worker pulls its next job
pub const DEFAULT_POLITENESS_DELAY: Duration = Duration::from_millis(100);

/// Fixed-size pool of page workers
pub struct WorkerPool {
    job: Arc<PageJob>,
    workers: usize,
    politeness_delay: Duration,
}

/// Everything one worker task owns
struct WorkerContext {
    id: usize,
    job: Arc<PageJob>,
    jobs: Arc<Mutex<mpsc::Receiver<PageIndex>>>,
    results: mpsc::Sender<PageResult>,
    cancel: CancellationToken,
    politeness_delay: Duration,
}

impl WorkerPool {
    /// Creates a pool of `workers` workers sharing `job`
    pub fn new(job: Arc<PageJob>, workers: usize) -> Self {
        Self {
            job,
            workers: workers.max(1),
            politeness_delay: DEFAULT_POLITENESS_DELAY,
        }
    }

    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay = delay;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `pages` page jobs and aggregates their results
    ///
    /// Returns when every worker has exited and the result queue is drained. If
    /// `cancel` fires, workers stop before their next job, in-flight fetches are
    /// abandoned and the outcome holds whatever was emitted before that point.
    pub async fn run(&self, pages: u32, cancel: CancellationToken) -> AggregateOutcome {
        let capacity = (pages as usize).max(1);
        let (job_tx, job_rx) = mpsc::channel::<PageIndex>(capacity);
        let (result_tx, result_rx) = mpsc::channel::<PageResult>(capacity);

        // The queue holds every job, so seeding never waits on a consumer
        for page in PageIndex::range(pages) {
            if job_tx.send(page).await.is_err() {
                break;
            }
        }
        drop(job_tx);

        let jobs = Arc::new(Mutex::new(job_rx));
        let mut workers = JoinSet::new();
        for id in 0..self.workers {
            workers.spawn(run_worker(WorkerContext {
                id,
                job: Arc::clone(&self.job),
                jobs: Arc::clone(&jobs),
                results: result_tx.clone(),
                cancel: cancel.clone(),
                politeness_delay: self.politeness_delay,
            }));
        }
        tracing::debug!("Started {} workers for {} pages", self.workers, pages);

        // Completion barrier: the result queue closes only after every worker exited
        let supervisor = tokio::spawn(async move {
            while let Some(joined) = workers.join_next().await {
                if let Err(e) = joined {
                    tracing::error!("Worker task failed: {}", e);
                }
            }
            drop(result_tx);
        });

        let mut outcome = Aggregator::collect(result_rx).await;
        if let Err(e) = supervisor.await {
            tracing::error!("Worker supervisor failed: {}", e);
        }

        outcome.interrupted = cancel.is_cancelled();
        outcome
    }
}

async fn run_worker(ctx: WorkerContext) {
    let WorkerContext {
        id,
        job,
        jobs,
        results,
        cancel,
        politeness_delay,
    } = ctx;

    let mut state = WorkerState::Idle;
    let mut completed = 0usize;

    loop {
        if cancel.is_cancelled() {
            tracing::debug!("Worker {} observed cancellation", id);
            break;
        }

        let Some(page) = next_job(&jobs, &cancel).await else {
            break;
        };

        advance(id, &mut state, WorkerState::Fetching);
        tracing::info!("Scraping page {}...", page);

        let processed = job
            .process_with(page, &cancel, || {
                advance(id, &mut state, WorkerState::Parsing)
            })
            .await;
        let Some(result) = processed else {
            tracing::debug!("Worker {} abandoned page {}", id, page);
            break;
        };

        advance(id, &mut state, WorkerState::Emitting);
        if results.send(result).await.is_err() {
            tracing::warn!("Result queue closed, worker {} stopping", id);
            break;
        }
        completed += 1;
        advance(id, &mut state, WorkerState::Idle);

        let cancelled = tokio::select! {
            biased;
            _ = cancel.cancelled() => true,
            _ = tokio::time::sleep(politeness_delay) => false,
        };
        if cancelled {
            break;
        }
    }

    advance(id, &mut state, WorkerState::Done);
    tracing::debug!("Worker {} finished after {} page(s)", id, completed);
}

/// Pulls the next page index, or None once the queue is exhausted or cancelled
async fn next_job(
    jobs: &Mutex<mpsc::Receiver<PageIndex>>,
    cancel: &CancellationToken,
) -> Option<PageIndex> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        page = async { jobs.lock().await.recv().await } => page,
    }
}

fn advance(id: usize, state: &mut WorkerState, next: WorkerState) {
    debug_assert!(
        state.can_transition_to(next),
        "worker {} cannot move from {} to {}",
        id,
        state,
        next
    );
    tracing::trace!("Worker {}: {} -> {}", id, state, next);
    *state = next;
}
