//! Single-source breadth-first traversal.
//!
//! # Overview
//!
//! [`shortest_paths`] is the shared primitive behind betweenness: from a
//! source `s` it records the visitation order `S` (non-decreasing distance),
//! the number of shortest paths `σ(w)`, and the immediate predecessors
//! `P(w)` of every reached node. [`distances`] is the cheaper variant used by
//! closeness, which only needs the reach count and distance sum.
//!
//! Both run in O(V + E). Nodes in another component are never reached;
//! their σ and distance read back as `None`.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use devnet_core::graph::CollabGraph;

/// Result of one Brandes-style BFS from a single source.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: NodeIndex,
    order: Vec<NodeIndex>,
    sigma: Vec<f64>,
    dist: Vec<Option<usize>>,
    predecessors: Vec<Vec<NodeIndex>>,
}

impl ShortestPaths {
    /// The traversal source.
    #[must_use]
    pub const fn source(&self) -> NodeIndex {
        self.source
    }

    /// Reached nodes in visitation order (non-decreasing distance).
    #[must_use]
    pub fn order(&self) -> &[NodeIndex] {
        &self.order
    }

    /// Number of shortest `s → w` paths, or `None` if `w` is unreachable.
    #[must_use]
    pub fn sigma(&self, w: NodeIndex) -> Option<f64> {
        self.dist
            .get(w.index())
            .copied()
            .flatten()
            .map(|_| self.sigma[w.index()])
    }

    /// Hop distance from the source, or `None` if `w` is unreachable.
    #[must_use]
    pub fn distance(&self, w: NodeIndex) -> Option<usize> {
        self.dist.get(w.index()).copied().flatten()
    }

    /// Immediate predecessors of `w` on shortest `s → w` paths.
    #[must_use]
    pub fn predecessors(&self, w: NodeIndex) -> &[NodeIndex] {
        self.predecessors.get(w.index()).map_or(&[], Vec::as_slice)
    }

    /// Consume into the raw index-addressed vectors: visitation order, σ,
    /// and predecessor lists.
    #[must_use]
    pub fn into_parts(self) -> (Vec<NodeIndex>, Vec<f64>, Vec<Vec<NodeIndex>>) {
        (self.order, self.sigma, self.predecessors)
    }
}

/// Run BFS from `source`, counting shortest paths and recording predecessors.
///
/// # Panics
///
/// Panics if `source` is not a node of `graph`.
#[must_use]
pub fn shortest_paths(graph: &CollabGraph, source: NodeIndex) -> ShortestPaths {
    let n = graph.node_count();
    let si = source.index();

    // Stack: nodes in order of discovery (farthest popped first).
    let mut order: Vec<NodeIndex> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut dist: Vec<Option<usize>> = vec![None; n];

    sigma[si] = 1.0;
    dist[si] = Some(0);

    let mut queue: VecDeque<NodeIndex> = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        let vi = v.index();
        order.push(v);
        let Some(dv) = dist[vi] else { continue };

        for w in graph.neighbor_indices(v) {
            let wi = w.index();

            // First visit to w?
            if dist[wi].is_none() {
                dist[wi] = Some(dv + 1);
                queue.push_back(w);
            }

            // Shortest path to w via v?
            if dist[wi] == Some(dv + 1) {
                sigma[wi] += sigma[vi];
                predecessors[wi].push(v);
            }
        }
    }

    ShortestPaths {
        source,
        order,
        sigma,
        dist,
        predecessors,
    }
}

/// Reach of a distances-only BFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reach {
    /// Nodes reached, including the source.
    pub reached: usize,
    /// Sum of hop distances to every reached node.
    pub total_distance: usize,
}

/// Run BFS from `source`, keeping only the reach count and distance sum.
///
/// # Panics
///
/// Panics if `source` is not a node of `graph`.
#[must_use]
pub fn distances(graph: &CollabGraph, source: NodeIndex) -> Reach {
    let mut dist: Vec<Option<usize>> = vec![None; graph.node_count()];
    dist[source.index()] = Some(0);

    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();
    queue.push_back((source, 0));

    let mut reach = Reach {
        reached: 0,
        total_distance: 0,
    };

    while let Some((v, dv)) = queue.pop_front() {
        reach.reached += 1;
        reach.total_distance += dv;

        for w in graph.neighbor_indices(v) {
            if dist[w.index()].is_none() {
                dist[w.index()] = Some(dv + 1);
                queue.push_back((w, dv + 1));
            }
        }
    }

    reach
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
