//! Execution plumbing shared by the per-source calculators.
//!
//! # Determinism
//!
//! Betweenness sums one contribution vector per source. Sources are split
//! into fixed chunks of [`SOURCES_PER_CHUNK`]; each chunk accumulates into
//! its own vector and chunk vectors are added to the total strictly in chunk
//! order. Parallel and sequential runs perform the same additions in the
//! same order, so their scores are bit-identical and independent of thread
//! scheduling.
//!
//! # Cancellation
//!
//! [`CancelToken`] is polled before every source. A tripped token aborts the
//! whole computation with [`CentralityError::Cancelled`]; no partial scores
//! escape.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use devnet_core::ErrorCode;
use devnet_core::graph::CollabGraph;

/// Sources accumulated into one partial vector.
pub const SOURCES_PER_CHUNK: usize = 64;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from running the centrality engine.
#[derive(Debug, thiserror::Error)]
pub enum CentralityError {
    /// The [`CancelToken`] was tripped before all sources were processed.
    #[error("centrality computation cancelled")]
    Cancelled,

    /// A dedicated worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Report(#[from] csv::Error),
}

impl CentralityError {
    /// The stable [`ErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Cancelled => ErrorCode::Cancelled,
            Self::ThreadPool(_) => ErrorCode::InternalUnexpected,
            Self::Report(_) => ErrorCode::ReportWriteFailed,
        }
    }
}

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// Shared cancellation flag, cheap to clone across threads.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, untripped token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// `true` once [`CancelToken::cancel`] has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<(), CentralityError> {
        if self.is_cancelled() {
            Err(CentralityError::Cancelled)
        } else {
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// ComputeOptions
// ---------------------------------------------------------------------------

/// How the per-source loops are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputeOptions {
    /// Distribute sources across rayon workers.
    pub parallel: bool,
    /// Size of a dedicated pool; `None` uses the global pool.
    pub threads: Option<usize>,
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

impl ComputeOptions {
    /// Single-threaded execution.
    #[must_use]
    pub const fn sequential() -> Self {
        Self {
            parallel: false,
            threads: None,
        }
    }

    /// Run `f` inside the configured pool.
    fn install<R, F>(&self, f: F) -> Result<R, CentralityError>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match self.threads {
            Some(n) if self.parallel && n > 0 => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                Ok(pool.install(f))
            }
            _ => Ok(f()),
        }
    }
}

// ---------------------------------------------------------------------------
// Drivers
// ---------------------------------------------------------------------------

/// Sum `per_source` contributions over every node as source.
///
/// `per_source(s, acc)` adds source `s`'s contribution into `acc`, a vector
/// indexed by node index.
pub(crate) fn sum_over_sources<F>(
    graph: &CollabGraph,
    options: &ComputeOptions,
    cancel: &CancelToken,
    per_source: F,
) -> Result<Vec<f64>, CentralityError>
where
    F: Fn(NodeIndex, &mut [f64]) + Sync,
{
    let n = graph.node_count();
    let sources: Vec<NodeIndex> = graph.node_indices().collect();

    let run_chunk = |chunk: &[NodeIndex]| -> Result<Vec<f64>, CentralityError> {
        let mut acc = vec![0.0; n];
        for &s in chunk {
            cancel.check()?;
            per_source(s, &mut acc);
        }
        Ok(acc)
    };

    let parallel = options.parallel;
    options.install(|| {
        let mut total = vec![0.0; n];
        // Bounded batches keep at most a handful of partial vectors alive.
        let batch = SOURCES_PER_CHUNK * rayon::current_num_threads().max(1) * 2;

        for group in sources.chunks(batch) {
            let partials: Vec<Vec<f64>> = if parallel {
                group
                    .par_chunks(SOURCES_PER_CHUNK)
                    .map(run_chunk)
                    .collect::<Result<_, _>>()?
            } else {
                group
                    .chunks(SOURCES_PER_CHUNK)
                    .map(run_chunk)
                    .collect::<Result<_, _>>()?
            };

            for partial in partials {
                for (t, p) in total.iter_mut().zip(partial) {
                    *t += p;
                }
            }
        }
        Ok(total)
    })?
}

/// Compute one independent value per node, in node order.
pub(crate) fn map_over_nodes<F>(
    graph: &CollabGraph,
    options: &ComputeOptions,
    cancel: &CancelToken,
    per_node: F,
) -> Result<Vec<f64>, CentralityError>
where
    F: Fn(NodeIndex) -> f64 + Sync,
{
    let nodes: Vec<NodeIndex> = graph.node_indices().collect();
    let eval = |&s: &NodeIndex| -> Result<f64, CentralityError> {
        cancel.check()?;
        Ok(per_node(s))
    };

    if options.parallel {
        options.install(|| nodes.par_iter().map(eval).collect())?
    } else {
        nodes.iter().map(eval).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
