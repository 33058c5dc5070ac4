//! Centrality metrics for the co-authorship graph.
//!
//! # Overview
//!
//! Each metric answers a different question about a contributor's place in
//! the network:
//!
//! - **Degree centrality** (`degree`): What fraction of all other
//!   contributors has this one worked directly alongside?
//! - **Betweenness centrality** (`betweenness`): How often does this
//!   contributor sit on the shortest collaboration chain between two others?
//! - **Closeness centrality** (`closeness`): How few hops does it take this
//!   contributor to reach everyone they can reach?
//!
//! # Usage
//!
//! Every metric takes a [`CollabGraph`] reference and value-returns a
//! [`ScoreMap`] keyed by node id, in the graph's canonical node order.
//! Scores are normalized to `[0, 1]`. Graphs with fewer than two nodes
//! score 0 everywhere.
//!
//! ```rust,ignore
//! use devnet_metrics::metrics::{betweenness, closeness, degree};
//! use devnet_metrics::{CancelToken, ComputeOptions};
//!
//! let opts = ComputeOptions::default();
//! let token = CancelToken::new();
//! let dc = degree::degree_centrality(&graph);
//! let bc = betweenness::betweenness_centrality(&graph, &opts, &token)?;
//! let cc = closeness::closeness_centrality(&graph, &opts, &token)?;
//! ```

use indexmap::IndexMap;

use devnet_core::graph::CollabGraph;

pub mod betweenness;
pub mod closeness;
pub mod degree;

/// Node id → score, iterating in the graph's canonical node order.
pub type ScoreMap = IndexMap<String, f64>;

/// Attach ids to a node-index-addressed score vector.
fn into_score_map(graph: &CollabGraph, values: &[f64]) -> ScoreMap {
    graph
        .node_indices()
        .filter_map(|idx| {
            let id = graph.node_id(idx)?;
            Some((id.to_string(), values.get(idx.index()).copied().unwrap_or(0.0)))
        })
        .collect()
}
