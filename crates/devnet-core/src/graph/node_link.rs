//! Node-link JSON interchange.
//!
//! The document shape shared with graph construction and plotting tools:
//!
//! ```json
//! {
//!   "directed": false,
//!   "multigraph": false,
//!   "graph": {},
//!   "nodes": [{"id": "alice@x.org"}, {"id": "bob@y.org"}],
//!   "links": [{"source": "alice@x.org", "target": "bob@y.org"}]
//! }
//! ```
//!
//! `graph` is carried as an opaque object. On import, `edges` is accepted as
//! an alias for `links`, and extra per-node or per-link attributes are
//! ignored. Directed or multigraph documents are rejected.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::error::GraphError;
use crate::graph::model::{CollabGraph, GraphBuilder, SelfLoopPolicy};

/// A serialized undirected simple graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkDocument {
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub multigraph: bool,
    #[serde(default)]
    pub graph: Map<String, Value>,
    pub nodes: Vec<NodeEntry>,
    #[serde(default, alias = "edges")]
    pub links: Vec<LinkEntry>,
}

/// One entry of the `nodes` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub id: String,
}

/// One entry of the `links` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub source: String,
    pub target: String,
}

impl NodeLinkDocument {
    /// Snapshot a graph. Nodes are listed in canonical order and links in
    /// insertion order.
    #[must_use]
    pub fn from_graph(graph: &CollabGraph) -> Self {
        Self {
            directed: false,
            multigraph: false,
            graph: Map::new(),
            nodes: graph
                .nodes()
                .map(|id| NodeEntry { id: id.to_string() })
                .collect(),
            links: graph
                .edges()
                .map(|(u, v)| LinkEntry {
                    source: u.to_string(),
                    target: v.to_string(),
                })
                .collect(),
        }
    }

    /// Parse a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Serialization`] for malformed JSON or a
    /// schema mismatch.
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a document from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Serialization`] for malformed JSON, a schema
    /// mismatch, or a failing reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GraphError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serialize the document as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Serialization`] if writing fails.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), GraphError> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Rebuild the graph described by this document.
    ///
    /// Node order is the `nodes` order; link endpoints missing from `nodes`
    /// are registered on first sight.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Serialization`] for directed or multigraph
    /// documents, and [`GraphError::SelfLoop`] for self-loop links under
    /// [`SelfLoopPolicy::Reject`].
    #[instrument(skip(self), fields(nodes = self.nodes.len(), links = self.links.len()))]
    pub fn into_graph(self, policy: SelfLoopPolicy) -> Result<CollabGraph, GraphError> {
        if self.directed {
            return Err(GraphError::Serialization(
                "directed graphs are not supported".to_string(),
            ));
        }
        if self.multigraph {
            return Err(GraphError::Serialization(
                "multigraphs are not supported".to_string(),
            ));
        }

        let mut builder = GraphBuilder::with_self_loop_policy(policy);
        for node in &self.nodes {
            builder.add_node(&node.id);
        }
        for link in &self.links {
            builder.add_edge(&link.source, &link.target)?;
        }
        Ok(builder.build())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
