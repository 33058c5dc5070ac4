//! `devnet run`: edge list straight to centrality report.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{Context, load_edge_list, save_node_link, write_report};

/// Arguments for `devnet run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Edge list, one `a:b` pair per line (`-` for stdin).
    #[arg(value_name = "EDGES")]
    pub edges: PathBuf,

    /// Report output (`-` for stdout).
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Also save the intermediate node-link document.
    #[arg(long, value_name = "PATH")]
    pub graph_out: Option<PathBuf>,
}

/// Execute `devnet run`.
pub fn run_pipeline(args: &RunArgs, ctx: &Context) -> Result<()> {
    let graph = load_edge_list(&args.edges, ctx)?;
    if let Some(path) = &args.graph_out {
        save_node_link(&graph, path)?;
    }
    write_report(&graph, &args.report, ctx)
}
