#![forbid(unsafe_code)]
//! devnet-metrics library.
//!
//! The centrality engine: breadth-first shortest paths, the degree,
//! betweenness, and closeness calculators, and the report that joins them.
//!
//! # Conventions
//!
//! - **Errors**: [`CentralityError`] for the engine; graph errors stay in
//!   `devnet_core::GraphError`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod bfs;
pub mod exec;
pub mod metrics;
pub mod report;

pub use exec::{CancelToken, CentralityError, ComputeOptions};
pub use metrics::ScoreMap;
pub use report::{CentralityRecord, CentralityReport, assemble_report, compute_report};
