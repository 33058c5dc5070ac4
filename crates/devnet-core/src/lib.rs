#![forbid(unsafe_code)]
//! devnet-core library.
//!
//! The undirected co-authorship graph, its edge-list and node-link
//! encodings, summary statistics, and configuration.
//!
//! # Conventions
//!
//! - **Errors**: [`GraphError`] for graph construction and queries;
//!   [`config::ConfigError`] for config loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;

pub use error::{ErrorCode, GraphError};
