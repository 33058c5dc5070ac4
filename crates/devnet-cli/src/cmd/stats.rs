//! `devnet stats`: structural summary of a graph.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use tracing::{info, warn};

use devnet_core::graph::{CollabGraph, GraphStats, NodeLinkDocument};

use super::{Context, read_to_string};
use crate::output::{OutputMode, pretty_kv, pretty_section, render};

/// Input encoding for `devnet stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Node-link if the input is a JSON object, edge list otherwise.
    #[default]
    Auto,
    /// `a:b` edge list.
    Edges,
    /// Node-link JSON.
    NodeLink,
}

impl InputFormat {
    fn resolve(self, content: &str) -> Self {
        match self {
            Self::Auto if content.trim_start().starts_with('{') => Self::NodeLink,
            Self::Auto => Self::Edges,
            other => other,
        }
    }
}

/// Arguments for `devnet stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Edge list or node-link document (`-` for stdin).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Input encoding.
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub from: InputFormat,

    /// Emit JSON instead of aligned text.
    #[arg(long)]
    pub json: bool,
}

/// Execute `devnet stats`.
pub fn run_stats(args: &StatsArgs, ctx: &Context) -> Result<()> {
    let content = read_to_string(&args.input)?;
    let graph = parse_graph(&content, args.from, ctx)
        .with_context(|| format!("failed to load graph {}", args.input.display()))?;
    let stats = GraphStats::from_graph(&graph);
    info!(nodes = stats.node_count, edges = stats.edge_count, "graph stats computed");
    if stats.is_flat() && stats.node_count > 1 {
        warn!(nodes = stats.node_count, "graph has no edges; every centrality score will be 0");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(OutputMode::from_json_flag(args.json), &mut out, &stats, |s, w| {
        print_pretty(s, &args.input, w)
    })
}

fn parse_graph(content: &str, from: InputFormat, ctx: &Context) -> Result<CollabGraph> {
    let graph = match from.resolve(content) {
        InputFormat::NodeLink => {
            NodeLinkDocument::from_json_str(content)?.into_graph(ctx.self_loops())?
        }
        InputFormat::Edges | InputFormat::Auto => {
            CollabGraph::from_edge_list(content.as_bytes(), ctx.self_loops())?
        }
    };
    Ok(graph)
}

fn print_pretty(stats: &GraphStats, input: &Path, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Graph {}", input.display()))?;
    pretty_kv(w, "nodes", stats.node_count.to_string())?;
    pretty_kv(w, "edges", stats.edge_count.to_string())?;
    pretty_kv(w, "density", format!("{:.4}", stats.density))?;
    pretty_kv(w, "components", stats.component_count.to_string())?;
    pretty_kv(w, "connected", if stats.is_connected() { "yes" } else { "no" })?;
    pretty_kv(w, "largest component", stats.largest_component.to_string())?;
    pretty_kv(w, "isolated nodes", stats.isolated_node_count.to_string())?;
    pretty_kv(w, "max degree", stats.max_degree.to_string())?;
    pretty_kv(w, "self-loops dropped", stats.self_loops_dropped.to_string())?;
    pretty_kv(w, "content hash", &stats.content_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use devnet_core::config::DevnetConfig;

    fn ctx() -> Context {
        Context::new(DevnetConfig::default(), true, None)
    }

    #[test]
    fn auto_detects_node_link() {
        assert_eq!(InputFormat::Auto.resolve("  {\"nodes\": []}"), InputFormat::NodeLink);
        assert_eq!(InputFormat::Auto.resolve("a:b\n"), InputFormat::Edges);
        assert_eq!(InputFormat::Edges.resolve("{"), InputFormat::Edges);
    }

    #[test]
    fn both_encodings_give_the_same_stats() {
        let edges = "a:b\nb:c\nc:c\n";
        let from_edges = parse_graph(edges, InputFormat::Auto, &ctx()).unwrap();

        let mut json = Vec::new();
        NodeLinkDocument::from_graph(&from_edges).to_writer(&mut json).unwrap();
        let json = String::from_utf8(json).unwrap();
        let from_json = parse_graph(&json, InputFormat::Auto, &ctx()).unwrap();

        assert_eq!(from_edges.content_hash(), from_json.content_hash());
        assert_eq!(GraphStats::from_graph(&from_json).node_count, 3);
    }

    #[test]
    fn forced_edges_format_rejects_json() {
        let err = parse_graph("{\"nodes\": [], \"links\": []}", InputFormat::Edges, &ctx()).unwrap_err();
        assert!(err.to_string().contains("line 1"), "{err}");
    }

    #[test]
    fn pretty_output_lists_every_field() {
        let g = parse_graph("a:b\n", InputFormat::Edges, &ctx()).unwrap();
        let mut buf = Vec::new();
        print_pretty(&GraphStats::from_graph(&g), Path::new("edges.txt"), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        for key in ["nodes:", "edges:", "density:", "components:", "content hash:"] {
            assert!(text.contains(key), "missing {key}");
        }
        assert!(text.lines().any(|l| l.starts_with("connected:") && l.ends_with("yes")));
    }

    #[test]
    fn pretty_output_flags_disconnected_graphs() {
        let g = parse_graph("a:b
c:d
", InputFormat::Edges, &ctx()).unwrap();
        let mut buf = Vec::new();
        print_pretty(&GraphStats::from_graph(&g), Path::new("edges.txt"), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().any(|l| l.starts_with("connected:") && l.ends_with("no")));
    }
}
