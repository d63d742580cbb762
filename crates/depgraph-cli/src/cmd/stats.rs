//! `dg stats`: topological order and per-node dependency counts.

use std::io::{self, Write};

use clap::Args;
use depgraph_analysis::{graph_stats, topological_sort};
use depgraph_core::DepGraph;
use indexmap::IndexMap;
use serde::Serialize;

use crate::cmd::{ManifestArg, fail, load_graph};
use crate::config::AnalysisConfig;
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `dg stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub manifest: ManifestArg,

    /// Also list each node's direct dependency count.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Report payload for `dg stats`.
#[derive(Debug, Serialize)]
struct StatsOutput {
    /// `None` when the graph has cycles.
    topological_order: Option<Vec<String>>,
    cycle_count: usize,
    /// Display label (`name==version`) and out-degree per node, verbose only.
    #[serde(skip_serializing_if = "Option::is_none")]
    direct_deps: Option<IndexMap<String, usize>>,
    node_count: usize,
    edge_count: usize,
    max_depth: usize,
}

/// Execute `dg stats`.
pub fn run_stats(
    args: &StatsArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.manifest.file, output)?;
    let summary = graph_stats(&graph);

    let topological_order = if summary.has_cycles {
        None
    } else {
        Some(topological_sort(&graph).or_else(|err| fail(output, err))?)
    };

    let direct_deps = if args.verbose || config.verbose {
        Some(direct_dep_counts(&graph).or_else(|err| fail(output, err))?)
    } else {
        None
    };

    let payload = StatsOutput {
        topological_order,
        cycle_count: summary.cycle_count,
        direct_deps,
        node_count: summary.node_count,
        edge_count: summary.edge_count,
        max_depth: summary.max_depth,
    };

    render_mode(output, &payload, render_stats_text, render_stats_pretty)
}

fn direct_dep_counts(graph: &DepGraph) -> depgraph_core::Result<IndexMap<String, usize>> {
    graph
        .nodes()
        .map(|node| {
            graph
                .out_degree(&node.name)
                .map(|count| (node.to_string(), count))
        })
        .collect()
}

fn render_stats_text(payload: &StatsOutput, w: &mut dyn Write) -> io::Result<()> {
    match &payload.topological_order {
        Some(order) => writeln!(w, "order {}", order.join(" "))?,
        None => writeln!(w, "order unavailable ({} cycles)", payload.cycle_count)?,
    }
    if let Some(direct) = &payload.direct_deps {
        for (name, count) in direct {
            writeln!(w, "deps {name} {count}")?;
        }
    }
    writeln!(
        w,
        "total nodes={} edges={} depth={}",
        payload.node_count, payload.edge_count, payload.max_depth
    )
}

fn render_stats_pretty(payload: &StatsOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Graph Statistics")?;

    match &payload.topological_order {
        Some(order) => {
            writeln!(w, "\n  Topological order ({} nodes):", order.len())?;
            writeln!(w, "    {}", order.join(" → "))?;
        }
        None => {
            writeln!(
                w,
                "\n  Graph has {} cycle(s); topological sort unavailable.",
                payload.cycle_count
            )?;
        }
    }

    if let Some(direct) = &payload.direct_deps {
        writeln!(w, "\n  Per-node dependency counts:")?;
        for (name, count) in direct {
            writeln!(w, "    {name}: {count} direct dep(s)")?;
        }
    }

    writeln!(
        w,
        "\n  Total: {} nodes, {} edges, depth {}",
        payload.node_count, payload.edge_count, payload.max_depth
    )
}
