//! The co-authorship graph.
//!
//! # Overview
//!
//! [`CollabGraph`] is a simple undirected graph: no weights, no direction, no
//! self-loops, no parallel edges. Node identities are interned to petgraph
//! [`NodeIndex`] values on first sight, so node indices follow first-seen
//! order and traversal code never hashes strings.
//!
//! Graphs are assembled with a [`GraphBuilder`] and frozen by
//! [`GraphBuilder::build`]. A built graph exposes read accessors only.
//!
//! ## Self-loops
//!
//! An edge `u:u` never becomes an adjacency. Under
//! [`SelfLoopPolicy::Ignore`] the endpoint is still registered as a node and
//! the edge is counted in [`CollabGraph::self_loops_dropped`]. Under
//! [`SelfLoopPolicy::Reject`] the edge is an error.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GraphError;

// ---------------------------------------------------------------------------
// SelfLoopPolicy
// ---------------------------------------------------------------------------

/// What to do with an edge whose endpoints are the same node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfLoopPolicy {
    /// Register the node, drop the edge.
    #[default]
    Ignore,
    /// Fail with [`GraphError::SelfLoop`].
    Reject,
}

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Mutable construction stage of a [`CollabGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: UnGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    policy: SelfLoopPolicy,
    self_loops_dropped: usize,
}

impl GraphBuilder {
    /// Create an empty builder with the default self-loop policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with an explicit self-loop policy.
    #[must_use]
    pub fn with_self_loop_policy(policy: SelfLoopPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Register `id` as a node. Idempotent; returns the node's index.
    pub fn add_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_map.insert(id.to_string(), idx);
        idx
    }

    /// Register both endpoints and record the mutual adjacency `u — v`.
    ///
    /// Returns `true` when a new adjacency was recorded and `false` when the
    /// edge was a duplicate or an ignored self-loop.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::SelfLoop`] for `u == v` under
    /// [`SelfLoopPolicy::Reject`].
    pub fn add_edge(&mut self, u: &str, v: &str) -> Result<bool, GraphError> {
        if u == v {
            if self.policy == SelfLoopPolicy::Reject {
                return Err(GraphError::SelfLoop(u.to_string()));
            }
            self.add_node(u);
            self.self_loops_dropped += 1;
            debug!(node = u, "dropping self-loop edge");
            return Ok(false);
        }

        let a = self.add_node(u);
        let b = self.add_node(v);

        // petgraph allows parallel edges; the model does not.
        if self.graph.contains_edge(a, b) {
            return Ok(false);
        }
        self.graph.add_edge(a, b, ());
        Ok(true)
    }

    /// Freeze the builder into an immutable graph.
    #[must_use]
    pub fn build(self) -> CollabGraph {
        if self.self_loops_dropped > 0 {
            warn!(
                count = self.self_loops_dropped,
                "ignored self-loop edges while building graph"
            );
        }
        CollabGraph {
            graph: self.graph,
            node_map: self.node_map,
            self_loops_dropped: self.self_loops_dropped,
        }
    }
}

// ---------------------------------------------------------------------------
// CollabGraph
// ---------------------------------------------------------------------------

/// An immutable undirected co-authorship graph.
///
/// Nodes are contributor identities. An edge `a — b` means `a` and `b`
/// modified at least one common file.
#[derive(Debug, Clone)]
pub struct CollabGraph {
    graph: UnGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    self_loops_dropped: usize,
}

impl CollabGraph {
    /// Build a graph from `(u, v)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::SelfLoop`] under [`SelfLoopPolicy::Reject`].
    pub fn from_edges<I, A, B>(edges: I, policy: SelfLoopPolicy) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut builder = GraphBuilder::with_self_loop_policy(policy);
        for (u, v) in edges {
            builder.add_edge(u.as_ref(), v.as_ref())?;
        }
        Ok(builder.build())
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// `true` when a normalization denominator `n - 1` would be zero.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.node_count() < 2
    }

    /// Number of self-loop edges dropped under [`SelfLoopPolicy::Ignore`].
    #[must_use]
    pub const fn self_loops_dropped(&self) -> usize {
        self.self_loops_dropped
    }

    /// Node ids in canonical (first-seen) order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx).map(String::as_str))
    }

    /// Node indices in canonical order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Look up the `NodeIndex` for a node id.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Return the id label for a node index.
    #[must_use]
    pub fn node_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// The neighbor set of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if `id` is not in the graph.
    pub fn neighbors(&self, id: &str) -> Result<BTreeSet<&str>, GraphError> {
        let idx = self.require(id)?;
        Ok(self
            .graph
            .neighbors(idx)
            .filter_map(|n| self.node_id(n))
            .collect())
    }

    /// Number of neighbors of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if `id` is not in the graph.
    pub fn degree(&self, id: &str) -> Result<usize, GraphError> {
        let idx = self.require(id)?;
        Ok(self.degree_of(idx))
    }

    /// Neighbors of a node index, for traversal code.
    pub fn neighbor_indices(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    /// Degree of a node index.
    #[must_use]
    pub fn degree_of(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors(idx).count()
    }

    /// Edges as `(u, v)` id pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.raw_edges().iter().filter_map(|edge| {
            let u = self.node_id(edge.source())?;
            let v = self.node_id(edge.target())?;
            Some((u, v))
        })
    }

    /// Borrow the underlying petgraph graph.
    #[must_use]
    pub const fn petgraph(&self) -> &UnGraph<String, ()> {
        &self.graph
    }

    /// BLAKE3 hash of the node set and the endpoint-normalized edge set.
    ///
    /// Independent of node and edge insertion order: two graphs with the same
    /// nodes and adjacency sets hash identically.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut nodes: Vec<&str> = self.nodes().collect();
        nodes.sort_unstable();

        let mut edges: Vec<(&str, &str)> = self
            .edges()
            .map(|(u, v)| if u <= v { (u, v) } else { (v, u) })
            .collect();
        edges.sort_unstable();

        let mut hasher = blake3::Hasher::new();
        for node in nodes {
            hasher.update(node.as_bytes());
            hasher.update(b"\x00");
        }
        hasher.update(b"\x01");
        for (u, v) in edges {
            hasher.update(u.as_bytes());
            hasher.update(b"\x00");
            hasher.update(v.as_bytes());
            hasher.update(b"\x00");
        }
        format!("blake3:{}", hasher.finalize())
    }

    fn require(&self, id: &str) -> Result<NodeIndex, GraphError> {
        self.node_index(id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> CollabGraph {
        CollabGraph::from_edges(edges.iter().copied(), SelfLoopPolicy::Ignore)
            .expect("ignore policy never fails")
    }

    #[test]
    fn empty_graph() {
        let g = GraphBuilder::new().build();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_degenerate());
        assert_eq!(g.nodes().count(), 0);
    }

    #[test]
    fn nodes_follow_first_seen_order() {
        let g = graph(&[("carol", "alice"), ("bob", "carol"), ("alice", "dave")]);
        let order: Vec<&str> = g.nodes().collect();
        assert_eq!(order, vec!["carol", "alice", "bob", "dave"]);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let g = graph(&[("a", "b"), ("b", "c")]);
        assert!(g.neighbors("a").unwrap().contains("b"));
        assert!(g.neighbors("b").unwrap().contains("a"));
        assert!(g.neighbors("b").unwrap().contains("c"));
        assert!(g.neighbors("c").unwrap().contains("b"));
        assert!(!g.neighbors("a").unwrap().contains("c"));
    }

    #[test]
    fn duplicate_edges_collapse() {
        let g = graph(&[("a", "b"), ("b", "a"), ("a", "b")]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree("a").unwrap(), 1);
        assert_eq!(g.degree("b").unwrap(), 1);
    }

    #[test]
    fn builder_reports_new_adjacency() {
        let mut b = GraphBuilder::new();
        assert!(b.add_edge("a", "b").unwrap());
        assert!(!b.add_edge("b", "a").unwrap());
        assert!(!b.add_edge("c", "c").unwrap());
    }

    #[test]
    fn self_loop_ignored_but_node_registered() {
        let g = graph(&[("a", "a"), ("a", "b")]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree("a").unwrap(), 1);
        assert_eq!(g.self_loops_dropped(), 1);

        let lone = graph(&[("solo", "solo")]);
        assert_eq!(lone.node_count(), 1);
        assert_eq!(lone.edge_count(), 0);
        assert_eq!(lone.degree("solo").unwrap(), 0);
    }

    #[test]
    fn self_loop_rejected_under_reject_policy() {
        let err = CollabGraph::from_edges([("a", "b"), ("c", "c")], SelfLoopPolicy::Reject)
            .expect_err("self-loop must be rejected");
        assert!(matches!(err, GraphError::SelfLoop(ref n) if n == "c"));
    }

    #[test]
    fn unknown_node_is_an_error() {
        let g = graph(&[("a", "b")]);
        assert!(matches!(
            g.neighbors("zed"),
            Err(GraphError::UnknownNode(ref n)) if n == "zed"
        ));
        assert!(matches!(g.degree("zed"), Err(GraphError::UnknownNode(_))));
    }

    #[test]
    fn index_accessors_agree_with_ids() {
        let g = graph(&[("a", "b"), ("a", "c")]);
        let a = g.node_index("a").expect("a is a node");
        assert_eq!(g.node_id(a), Some("a"));
        assert_eq!(g.degree_of(a), 2);
        let mut around: Vec<&str> = g.neighbor_indices(a).filter_map(|n| g.node_id(n)).collect();
        around.sort_unstable();
        assert_eq!(around, vec!["b", "c"]);
    }

    #[test]
    fn content_hash_ignores_insertion_order() {
        let g1 = graph(&[("a", "b"), ("b", "c"), ("c", "d")]);
        let g2 = graph(&[("d", "c"), ("b", "a"), ("c", "b")]);
        assert_eq!(g1.content_hash(), g2.content_hash());

        let g3 = graph(&[("a", "b"), ("b", "c")]);
        assert_ne!(g1.content_hash(), g3.content_hash());
        assert!(g1.content_hash().starts_with("blake3:"));
    }

    #[test]
    fn content_hash_sees_isolated_nodes() {
        let mut b = GraphBuilder::new();
        b.add_edge("a", "b").unwrap();
        let without = b.build();

        let mut b = GraphBuilder::new();
        b.add_edge("a", "b").unwrap();
        b.add_node("lonely");
        let with = b.build();

        assert_ne!(without.content_hash(), with.content_hash());
    }
}
