//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness contributors are "bridges"
//! between groups that otherwise rarely touch the same files.
//!
//! # Algorithm
//!
//! Brandes' algorithm (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and predecessor lists ([`crate::bfs::shortest_paths`]).
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes
//!    first) with an explicit stack.
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E).
//!
//! # Normalization
//!
//! Summing over ordered sources counts each unordered pair twice, so the
//! raw sums are divided by `(n-1)*(n-2)`, which maps them onto `[0, 1]`.
//! Graphs with `n <= 2` have no intermediate nodes; every score is 0.

use petgraph::graph::NodeIndex;
use tracing::{debug, instrument};

use devnet_core::ErrorCode;
use devnet_core::graph::CollabGraph;

use super::{ScoreMap, into_score_map};
use crate::bfs::shortest_paths;
use crate::exec::{CancelToken, CentralityError, ComputeOptions, sum_over_sources};

/// Compute normalized betweenness centrality for every node.
///
/// # Errors
///
/// Returns [`CentralityError::Cancelled`] if `cancel` trips before every
/// source has been processed, or [`CentralityError::ThreadPool`] if a
/// dedicated pool was requested and could not be built.
#[instrument(skip(graph, cancel), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn betweenness_centrality(
    graph: &CollabGraph,
    options: &ComputeOptions,
    cancel: &CancelToken,
) -> Result<ScoreMap, CentralityError> {
    let n = graph.node_count();

    if n <= 2 {
        debug!(code = %ErrorCode::DegenerateGraph, nodes = n, "betweenness scores default to 0");
        return Ok(into_score_map(graph, &vec![0.0; n]));
    }

    let mut cb = sum_over_sources(graph, options, cancel, |s, acc| {
        accumulate_from(graph, s, acc);
    })?;

    rescale(&mut cb, n);
    Ok(into_score_map(graph, &cb))
}

/// Add source `s`'s dependency contributions into `cb`.
fn accumulate_from(graph: &CollabGraph, s: NodeIndex, cb: &mut [f64]) {
    let (mut stack, sigma, predecessors) = shortest_paths(graph, s).into_parts();
    let mut delta: Vec<f64> = vec![0.0; graph.node_count()];

    while let Some(w) = stack.pop() {
        let wi = w.index();
        let coeff = (1.0 + delta[wi]) / sigma[wi];

        for &v in &predecessors[wi] {
            let vi = v.index();
            delta[vi] += sigma[vi] * coeff;
        }

        if w != s {
            cb[wi] += delta[wi];
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn rescale(cb: &mut [f64], n: usize) {
    let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
    for v in cb.iter_mut() {
        *v *= scale;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
