//! `devnet build`: edge list to node-link document.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use devnet_core::graph::write_edge_list;

use super::{Context, create_output, load_edge_list, save_node_link};

/// Arguments for `devnet build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Edge list, one `a:b` pair per line (`-` for stdin).
    #[arg(value_name = "EDGES")]
    pub edges: PathBuf,

    /// Node-link JSON output (`-` for stdout).
    #[arg(value_name = "GRAPH_JSON")]
    pub graph_out: PathBuf,

    /// Also write the deduplicated edge list.
    #[arg(long, value_name = "PATH")]
    pub edges_out: Option<PathBuf>,
}

/// Execute `devnet build`.
pub fn run_build(args: &BuildArgs, ctx: &Context) -> Result<()> {
    let graph = load_edge_list(&args.edges, ctx)?;
    save_node_link(&graph, &args.graph_out)?;

    if let Some(path) = &args.edges_out {
        let out = create_output(path)?;
        write_edge_list(out, graph.edges())
            .with_context(|| format!("failed to write edge list {}", path.display()))?;
        info!(output = %path.display(), edges = graph.edge_count(), "edge list written");
    }
    Ok(())
}
