#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use devnet_core::config::{ConfigError, resolve_config};
use devnet_core::{ErrorCode, GraphError};
use devnet_metrics::{CancelToken, CentralityError};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "devnet: centrality metrics for contributor collaboration graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (overrides .devnet/config.toml and the user config).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run every calculator on the current thread.
    #[arg(long, global = true)]
    sequential: bool,

    /// Worker threads for betweenness and closeness.
    #[arg(long, global = true, value_name = "N")]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Build a node-link graph from an edge list",
        long_about = "Read an `a:b` edge list and write the collaboration graph as node-link JSON.",
        after_help = "EXAMPLES:\n    # Build the graph document\n    devnet build edges.txt graph.json\n\n    # Also keep the deduplicated edge list\n    devnet build edges.txt graph.json --edges-out clean.txt"
    )]
    Build(cmd::build::BuildArgs),

    #[command(
        about = "Compute centrality for a node-link graph",
        long_about = "Compute degree, betweenness, and closeness centrality for a node-link graph and write the report.",
        after_help = "EXAMPLES:\n    # Write the report\n    devnet analyze graph.json report.csv\n\n    # Print it instead\n    devnet analyze graph.json -"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Compute centrality straight from an edge list",
        long_about = "Build the graph from an edge list and write the centrality report in one step.",
        after_help = "EXAMPLES:\n    # Edge list to report\n    devnet run edges.txt report.csv\n\n    # Keep the graph document too, single-threaded\n    devnet --sequential run edges.txt report.csv --graph-out graph.json"
    )]
    Run(cmd::run::RunArgs),

    #[command(
        about = "Summarize a graph",
        long_about = "Print node, edge, component, and degree statistics for an edge list or node-link graph.",
        after_help = "EXAMPLES:\n    # Detect the input format\n    devnet stats edges.txt\n\n    # Emit machine-readable output\n    devnet stats graph.json --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Generate shell completions",
        long_about = "Generate a shell completion script and print it to stdout.",
        after_help = "EXAMPLES:\n    # Bash\n    devnet completions bash > ~/.local/share/bash-completion/completions/devnet"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("DEVNET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "devnet=debug,info"
        } else {
            "devnet=info,warn"
        })
    });

    let format = env::var("DEVNET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Trip `cancel` on Ctrl+C so long computations stop between sources.
fn install_cancel_handler(cancel: &CancelToken) {
    let token = cancel.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        warn!("interrupt received, cancelling");
        token.cancel();
    }) {
        warn!(error = %err, "failed to install Ctrl+C handler");
    }
}

/// The first stable error code found in `err`'s cause chain.
fn error_code(err: &anyhow::Error) -> Option<ErrorCode> {
    err.chain().find_map(|cause| {
        cause
            .downcast_ref::<GraphError>()
            .map(GraphError::code)
            .or_else(|| cause.downcast_ref::<CentralityError>().map(CentralityError::code))
            .or_else(|| cause.downcast_ref::<ConfigError>().map(ConfigError::code))
    })
}

/// Resolve config and run the selected pipeline command.
fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    let project_root = env::current_dir()?;
    let config = resolve_config(&project_root, cli.config.as_deref())?;
    let ctx = cmd::Context::new(config, cli.sequential, cli.threads);
    install_cancel_handler(&ctx.cancel);

    match &cli.command {
        Commands::Build(args) => cmd::build::run_build(args, &ctx),
        Commands::Analyze(args) => cmd::analyze::run_analyze(args, &ctx),
        Commands::Run(args) => cmd::run::run_pipeline(args, &ctx),
        Commands::Stats(args) => cmd::stats::run_stats(args, &ctx),
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args, &mut command, &mut std::io::stdout());
    }

    let result = dispatch(&cli);

    if let Err(err) = &result
        && let Some(code) = error_code(err)
    {
        error!(code = %code, "{}", code.message());
        if let Some(hint) = code.hint() {
            eprintln!("hint: {hint}");
        }
    }

    result
}
