//! Command handlers and the plumbing they share.

pub mod analyze;
pub mod build;
pub mod completions;
pub mod run;
pub mod stats;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::info;

use devnet_core::config::{ComputeConfig, DevnetConfig};
use devnet_core::graph::{CollabGraph, NodeLinkDocument, SelfLoopPolicy};
use devnet_metrics::{CancelToken, ComputeOptions, compute_report};

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: DevnetConfig,
    pub options: ComputeOptions,
    pub cancel: CancelToken,
}

impl Context {
    /// Apply CLI overrides on top of the resolved config.
    pub fn new(config: DevnetConfig, sequential: bool, threads: Option<usize>) -> Self {
        let options = compute_options(&config.compute, sequential, threads);
        Self {
            config,
            options,
            cancel: CancelToken::new(),
        }
    }

    pub const fn self_loops(&self) -> SelfLoopPolicy {
        self.config.graph.self_loops
    }
}

fn compute_options(config: &ComputeConfig, sequential: bool, threads: Option<usize>) -> ComputeOptions {
    let threads = threads.unwrap_or(config.threads);
    ComputeOptions {
        parallel: config.parallel && !sequential,
        threads: (threads > 0).then_some(threads),
    }
}

// ---------------------------------------------------------------------------
// I/O helpers (`-` means stdin / stdout)
// ---------------------------------------------------------------------------

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if is_stdio(path) {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file =
        File::open(path).with_context(|| format!("failed to open input file {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

pub fn create_output(path: &Path) -> Result<Box<dyn Write>> {
    if is_stdio(path) {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

pub fn read_to_string(path: &Path) -> Result<String> {
    let mut content = String::new();
    open_input(path)?
        .read_to_string(&mut content)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(content)
}

// ---------------------------------------------------------------------------
// Pipeline steps
// ---------------------------------------------------------------------------

/// Parse an edge list into a graph.
pub fn load_edge_list(path: &Path, ctx: &Context) -> Result<CollabGraph> {
    info!(input = %path.display(), "reading edge list");
    let graph = CollabGraph::from_edge_list(open_input(path)?, ctx.self_loops())
        .with_context(|| format!("failed to read edge list {}", path.display()))?;
    info!(nodes = graph.node_count(), edges = graph.edge_count(), "graph built");
    Ok(graph)
}

/// Parse a node-link document into a graph.
pub fn load_node_link(path: &Path, ctx: &Context) -> Result<CollabGraph> {
    info!(input = %path.display(), "reading node-link document");
    let graph = NodeLinkDocument::from_reader(open_input(path)?)
        .and_then(|doc| doc.into_graph(ctx.self_loops()))
        .with_context(|| format!("failed to load graph {}", path.display()))?;
    info!(nodes = graph.node_count(), edges = graph.edge_count(), "graph loaded");
    Ok(graph)
}

/// Write the node-link document for `graph`.
pub fn save_node_link(graph: &CollabGraph, path: &Path) -> Result<()> {
    let mut out = create_output(path)?;
    NodeLinkDocument::from_graph(graph)
        .to_writer(&mut out)
        .with_context(|| format!("failed to write graph {}", path.display()))?;
    out.flush()
        .with_context(|| format!("failed to write graph {}", path.display()))?;
    info!(output = %path.display(), nodes = graph.node_count(), "node-link document written");
    Ok(())
}

/// Compute the centrality report for `graph` and write it to `path`.
///
/// Nothing is written if computation fails or is cancelled.
pub fn write_report(graph: &CollabGraph, path: &Path, ctx: &Context) -> Result<()> {
    let delimiter = ctx.config.report.delimiter_byte()?;
    let report =
        compute_report(graph, &ctx.options, &ctx.cancel).context("centrality computation failed")?;

    let out = create_output(path)?;
    report
        .write_csv(out, delimiter)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    info!(output = %path.display(), rows = report.len(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_flag_overrides_config() {
        let opts = compute_options(&ComputeConfig::default(), true, None);
        assert!(!opts.parallel);
        assert_eq!(opts.threads, None);
    }

    #[test]
    fn threads_flag_overrides_config() {
        let config = ComputeConfig {
            parallel: true,
            threads: 2,
        };
        assert_eq!(compute_options(&config, false, None).threads, Some(2));
        assert_eq!(compute_options(&config, false, Some(6)).threads, Some(6));
        assert_eq!(compute_options(&config, false, Some(0)).threads, None);
    }

    #[test]
    fn config_can_disable_parallelism() {
        let config = ComputeConfig {
            parallel: false,
            threads: 0,
        };
        assert!(!compute_options(&config, false, None).parallel);
    }

    #[test]
    fn dash_is_stdio() {
        assert!(is_stdio(Path::new("-")));
        assert!(!is_stdio(Path::new("./-x")));
    }
}
