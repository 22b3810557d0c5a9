//! Fixed-size pool fan-out with a blocking join.

use std::time::{Duration, Instant};

use aes_core::BlockEncryptor;
use an10922::{DiversificationInput, Diversifier, KekKey, MasterKey, WrappedKey};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;
use tracing::{debug, warn};

/// Size of a batch run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Worker threads in the pool.
    pub threads: usize,
    /// Number of diversification requests to submit.
    pub requests: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            requests: 1,
        }
    }
}

/// Failure to set up the runner.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The pool was configured with zero threads.
    #[error("worker pool needs at least one thread")]
    NoThreads,
    /// The pool could not be started.
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] ThreadPoolBuildError),
}

/// Result of one request.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Position of the request in submission order, starting at 1.
    pub execution_id: u64,
    /// Wall time spent on this request.
    pub elapsed: Duration,
    /// The wrapped key, or why this request failed.
    pub result: Result<WrappedKey, an10922::Error>,
}

/// All outcomes of a run, ordered by execution id.
#[derive(Debug)]
pub struct BatchReport {
    outcomes: Vec<BatchOutcome>,
    elapsed: Duration,
}

impl BatchReport {
    /// Outcomes in execution-id order.
    pub fn outcomes(&self) -> &[BatchOutcome] {
        &self.outcomes
    }

    /// Consumes the report, returning its outcomes.
    pub fn into_outcomes(self) -> Vec<BatchOutcome> {
        self.outcomes
    }

    /// Number of requests that produced a wrapped key.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of requests that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Wall time for the whole batch.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Runs batches of diversify-and-wrap requests on a dedicated pool.
pub struct BatchRunner {
    pool: ThreadPool,
    config: BatchConfig,
}

impl BatchRunner {
    /// Starts a pool with `config.threads` workers.
    pub fn new(config: BatchConfig) -> Result<Self, RuntimeError> {
        if config.threads == 0 {
            return Err(RuntimeError::NoThreads);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("an10922-worker-{i}"))
            .build()?;
        debug!(threads = config.threads, "worker pool started");
        Ok(Self { pool, config })
    }

    /// Returns the configuration the runner was built with.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Submits `config.requests` requests and waits for all of them.
    ///
    /// A failed request is reported in its outcome and does not stop the
    /// others. Diversified keys are dropped (and wiped) inside the worker;
    /// only wrapped keys leave it.
    pub fn run<C, K>(
        &self,
        diversifier: &Diversifier,
        master: &MasterKey<C>,
        kek: &KekKey<K>,
        input: &DiversificationInput,
    ) -> BatchReport
    where
        C: BlockEncryptor + Sync,
        K: BlockEncryptor + Sync,
    {
        let started = Instant::now();
        let outcomes: Vec<BatchOutcome> = self.pool.install(|| {
            (0..self.config.requests)
                .into_par_iter()
                .map(|index| {
                    let execution_id = index as u64 + 1;
                    let request_started = Instant::now();
                    let result = diversifier
                        .diversify_and_wrap(master, kek, input)
                        .map(|(_, wrapped)| wrapped);
                    if let Err(err) = &result {
                        warn!(execution_id, error = %err, "diversification request failed");
                    }
                    BatchOutcome {
                        execution_id,
                        elapsed: request_started.elapsed(),
                        result,
                    }
                })
                .collect()
        });

        let report = BatchReport {
            outcomes,
            elapsed: started.elapsed(),
        };
        debug!(
            requests = self.config.requests,
            succeeded = report.succeeded(),
            failed = report.failed(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "batch complete"
        );
        report
    }
}
