//! Closeness centrality with reach scaling.
//!
//! For node `v` with `reach` nodes reachable (itself included) at total hop
//! distance `totsp`:
//!
//! ```text
//! C(v) = (reach - 1) / totsp  *  (reach - 1) / (n - 1)
//! ```
//!
//! The first factor is the reciprocal mean distance inside `v`'s component;
//! the second scales it by the fraction of the graph `v` can reach at all
//! (Wasserman-Faust). Disconnected graphs therefore get finite scores, and a
//! node in a small island scores lower than an equally central node in the
//! main component. Isolated nodes and singleton graphs score 0.

use tracing::{debug, instrument};

use devnet_core::ErrorCode;
use devnet_core::graph::CollabGraph;

use super::{ScoreMap, into_score_map};
use crate::bfs::{Reach, distances};
use crate::exec::{CancelToken, CentralityError, ComputeOptions, map_over_nodes};

/// Compute closeness centrality for every node.
///
/// # Errors
///
/// Returns [`CentralityError::Cancelled`] if `cancel` trips before every
/// node has been scored, or [`CentralityError::ThreadPool`] if a dedicated
/// pool was requested and could not be built.
#[instrument(skip(graph, cancel), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn closeness_centrality(
    graph: &CollabGraph,
    options: &ComputeOptions,
    cancel: &CancelToken,
) -> Result<ScoreMap, CentralityError> {
    let n = graph.node_count();
    if graph.is_degenerate() {
        debug!(code = %ErrorCode::DegenerateGraph, nodes = n, "closeness scores default to 0");
        return Ok(into_score_map(graph, &vec![0.0; n]));
    }

    let values = map_over_nodes(graph, options, cancel, |v| {
        closeness_from_reach(distances(graph, v), n)
    })?;

    Ok(into_score_map(graph, &values))
}

#[allow(clippy::cast_precision_loss)]
fn closeness_from_reach(reach: Reach, n: usize) -> f64 {
    if reach.total_distance == 0 || n <= 1 {
        return 0.0;
    }
    let others = (reach.reached - 1) as f64;
    (others / reach.total_distance as f64) * (others / (n - 1) as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
