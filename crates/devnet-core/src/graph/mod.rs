//! Co-authorship graph module.
//!
//! # Overview
//!
//! This module owns the undirected contributor graph and its two external
//! encodings. The graph feeds every centrality calculator in
//! `devnet-metrics`.
//!
//! ## Pipeline
//!
//! ```text
//! edge list (a:b per line)        node-link JSON
//!        ↓  edges::read_edge_list        ↓  NodeLinkDocument::from_reader
//!        ↓  CollabGraph::from_edge_list  ↓  NodeLinkDocument::into_graph
//!        └──────────────→ CollabGraph ←──┘
//!                             ↓  stats::GraphStats::from_graph()
//!                         GraphStats (density, components, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use std::io::BufReader;
//! use devnet_core::graph::{CollabGraph, NodeLinkDocument, SelfLoopPolicy};
//!
//! let file = std::fs::File::open("edges.txt")?;
//! let graph = CollabGraph::from_edge_list(BufReader::new(file), SelfLoopPolicy::Ignore)?;
//! let doc = NodeLinkDocument::from_graph(&graph);
//! doc.to_writer(std::fs::File::create("network.json")?)?;
//! ```

pub mod edges;
pub mod model;
pub mod node_link;
pub mod stats;

pub use edges::{Edge, parse_edge_line, read_edge_list, write_edge_list};
pub use model::{CollabGraph, GraphBuilder, SelfLoopPolicy};
pub use node_link::{LinkEntry, NodeEntry, NodeLinkDocument};
pub use stats::GraphStats;
