//! `dg analyze`: one-screen summary of a dependency graph.

use std::io::{self, Write};

use clap::Args;
use depgraph_analysis::{GraphStats, graph_stats};

use crate::cmd::{ManifestArg, load_graph};
use crate::config::AnalysisConfig;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `dg analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub manifest: ManifestArg,

    /// Also list every cycle and every leaf node.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute `dg analyze`.
pub fn run_analyze(
    args: &AnalyzeArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.manifest.file, output)?;
    let stats = graph_stats(&graph);
    let verbose = args.verbose || config.verbose;

    render_mode(
        output,
        &stats,
        |stats, w| render_analyze_text(stats, verbose, w),
        |stats, w| render_analyze_pretty(stats, verbose, w),
    )
}

fn render_analyze_text(stats: &GraphStats, verbose: bool, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "nodes {}", stats.node_count)?;
    writeln!(w, "edges {}", stats.edge_count)?;
    writeln!(w, "roots {}", stats.root_nodes.join(" "))?;
    writeln!(w, "leaves {}", stats.leaf_count)?;
    writeln!(w, "max_depth {}", stats.max_depth)?;
    writeln!(w, "avg_deps {}", stats.avg_direct_deps)?;
    writeln!(w, "cycles {}", stats.cycle_count)?;

    if verbose {
        for cycle in &stats.cycles {
            writeln!(w, "cycle {}", cycle.join(" -> "))?;
        }
        writeln!(w, "leaf_nodes {}", stats.leaf_nodes.join(" "))?;
    }
    Ok(())
}

fn render_analyze_pretty(stats: &GraphStats, verbose: bool, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Dependency Graph Analysis")?;
    pretty_kv(w, "Nodes", stats.node_count.to_string())?;
    pretty_kv(w, "Edges", stats.edge_count.to_string())?;

    let roots = if stats.root_nodes.is_empty() {
        "(none)".to_string()
    } else {
        stats.root_nodes.join(", ")
    };
    pretty_kv(w, "Roots", roots)?;
    pretty_kv(w, "Leaves", stats.leaf_count.to_string())?;
    pretty_kv(w, "Max depth", stats.max_depth.to_string())?;
    pretty_kv(w, "Avg deps", stats.avg_direct_deps.to_string())?;

    if stats.has_cycles {
        pretty_kv(w, "Cycles", format!("{} detected", stats.cycle_count))?;
        if verbose {
            for (idx, cycle) in stats.cycles.iter().enumerate() {
                writeln!(w, "  Cycle {}: {}", idx + 1, cycle.join(" → "))?;
            }
        }
    } else {
        pretty_kv(w, "Cycles", "none")?;
    }

    if verbose {
        writeln!(w)?;
        pretty_kv(w, "Leaf nodes", stats.leaf_nodes.join(", "))?;
    }
    Ok(())
}
