#![forbid(unsafe_code)]

mod cmd;
mod config;
mod manifest;
mod output;

use std::env;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "dg: dependency graph analysis",
    long_about = None
)]
struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Summarize a dependency graph",
        after_help = "EXAMPLES:\n    # Counts, roots, depth, and cycles\n    dg analyze deps.json\n\n    # Also list every cycle and leaf\n    dg analyze deps.toml -v"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        alias = "detect-cycles",
        about = "List circular dependencies",
        after_help = "EXAMPLES:\n    # One path per back-edge\n    dg cycles deps.json\n\n    # Emit machine-readable output\n    dg cycles deps.json --json"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        about = "Show topological order and dependency counts",
        after_help = "EXAMPLES:\n    # Install order when the graph is acyclic\n    dg stats deps.json\n\n    # Per-node direct dependency counts\n    dg stats deps.json -v"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Find tightly-coupled clusters",
        after_help = "EXAMPLES:\n    # Strongly connected components with more than one member\n    dg scc deps.json"
    )]
    Scc(cmd::scc::SccArgs),

    #[command(
        about = "Show each node's distance from a root",
        after_help = "EXAMPLES:\n    # Depth from the first root\n    dg depth deps.json\n\n    # Depth from a chosen node\n    dg depth deps.json --root api"
    )]
    Depth(cmd::depth::DepthArgs),

    #[command(
        about = "List a node's transitive dependencies",
        after_help = "EXAMPLES:\n    # Everything web pulls in\n    dg deps deps.json web"
    )]
    Deps(cmd::deps::DepsArgs),

    #[command(about = "Generate shell completion scripts")]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DEPGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "depgraph=debug,info"
        } else {
            "depgraph=info,warn"
        })
    });

    let format = env::var("DEPGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

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

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let project_root = env::current_dir()?;
    let config = config::resolve_config(&project_root)?;
    let output = output::resolve_output_mode(cli.format, cli.json, config.output());
    debug!(?output, "resolved output mode");

    let analysis = &config.project.analysis;
    match cli.command {
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, output, analysis),
        Commands::Cycles(ref args) => cmd::cycles::run_cycles(args, output),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output, analysis),
        Commands::Scc(ref args) => cmd::scc::run_scc(args, output),
        Commands::Depth(ref args) => cmd::depth::run_depth(args, output, analysis),
        Commands::Deps(ref args) => cmd::deps::run_deps(args, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
