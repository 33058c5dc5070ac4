//! `devnet analyze`: node-link document to centrality report.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{Context, load_node_link, write_report};

/// Arguments for `devnet analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Node-link JSON produced by `devnet build` (`-` for stdin).
    #[arg(value_name = "GRAPH_JSON")]
    pub graph: PathBuf,

    /// Report output (`-` for stdout).
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,
}

/// Execute `devnet analyze`.
pub fn run_analyze(args: &AnalyzeArgs, ctx: &Context) -> Result<()> {
    let graph = load_node_link(&args.graph, ctx)?;
    write_report(&graph, &args.report, ctx)
}
