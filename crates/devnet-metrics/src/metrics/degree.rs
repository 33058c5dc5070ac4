//! Degree centrality: the fraction of other nodes a node touches directly.
//!
//! `score(n) = degree(n) / (node_count - 1)`. A graph with fewer than two
//! nodes has no "other nodes"; its only node (if any) scores 0.

use tracing::{debug, instrument};

use devnet_core::ErrorCode;
use devnet_core::graph::CollabGraph;

use super::{ScoreMap, into_score_map};

/// Compute normalized degree centrality for every node.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(graph: &CollabGraph) -> ScoreMap {
    let n = graph.node_count();
    if graph.is_degenerate() {
        debug!(code = %ErrorCode::DegenerateGraph, nodes = n, "degree scores default to 0");
        return into_score_map(graph, &vec![0.0; n]);
    }

    let scale = 1.0 / (n - 1) as f64;
    let values: Vec<f64> = graph
        .node_indices()
        .map(|idx| graph.degree_of(idx) as f64 * scale)
        .collect();

    into_score_map(graph, &values)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
