//! Basic graph statistics for the co-authorship graph.
//!
//! # Statistics Provided
//!
//! - **node_count**: Number of contributors.
//! - **edge_count**: Number of distinct co-authorship pairs.
//! - **density**: `2 * edge_count / (node_count * (node_count - 1))` for an
//!   undirected simple graph. Zero for graphs with 0 or 1 node.
//! - **component_count**: Number of connected components.
//! - **largest_component**: Node count of the biggest component.
//! - **isolated_node_count**: Nodes with no neighbors.
//! - **max_degree**: Highest neighbor count over all nodes.
//! - **self_loops_dropped**: Self-loop edges ignored during construction.
//! - **content_hash**: Order-independent BLAKE3 hash of nodes and edges.

use petgraph::unionfind::UnionFind;
use serde::Serialize;

use crate::graph::model::CollabGraph;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a co-authorship graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Ranges from 0.0 (no edges) to 1.0 (complete graph).
    pub density: f64,
    pub component_count: usize,
    pub largest_component: usize,
    pub isolated_node_count: usize,
    pub max_degree: usize,
    pub self_loops_dropped: usize,
    pub content_hash: String,
}

impl GraphStats {
    /// Compute statistics from a [`CollabGraph`].
    #[must_use]
    pub fn from_graph(graph: &CollabGraph) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let degrees: Vec<usize> = graph.node_indices().map(|idx| graph.degree_of(idx)).collect();
        let isolated_node_count = degrees.iter().filter(|&&d| d == 0).count();
        let max_degree = degrees.iter().copied().max().unwrap_or(0);
        let (component_count, largest_component) = component_sizes(graph);

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            component_count,
            largest_component,
            isolated_node_count,
            max_degree,
            self_loops_dropped: graph.self_loops_dropped(),
            content_hash: graph.content_hash(),
        }
    }

    /// Return `true` if the graph has no edges.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }

    /// Return `true` if every node can reach every other node.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.component_count <= 1
    }
}

// ---------------------------------------------------------------------------
// Internal helpers (cast precision suppressed at function scope)
// ---------------------------------------------------------------------------

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64 / 2.0;
    edge_count as f64 / max_edges
}

/// Number of connected components and the node count of the largest.
fn component_sizes(graph: &CollabGraph) -> (usize, usize) {
    let n = graph.node_count();
    let mut sets = UnionFind::<usize>::new(n);
    for edge in graph.petgraph().raw_edges() {
        sets.union(edge.source().index(), edge.target().index());
    }

    let mut sizes = vec![0usize; n];
    for node in 0..n {
        sizes[sets.find(node)] += 1;
    }
    let count = sizes.iter().filter(|&&size| size > 0).count();
    let largest = sizes.into_iter().max().unwrap_or(0);
    (count, largest)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
