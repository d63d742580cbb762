//! `dg depth`: BFS distance of every reachable node from a root.

use std::io::{self, Write};

use clap::Args;
use depgraph_analysis::compute_depth;
use indexmap::IndexMap;
use serde::Serialize;

use crate::cmd::{ManifestArg, fail, load_graph};
use crate::config::AnalysisConfig;
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `dg depth`.
#[derive(Args, Debug)]
pub struct DepthArgs {
    #[command(flatten)]
    pub manifest: ManifestArg,

    /// Start node; defaults to `[analysis] root`, then the first root node.
    #[arg(long)]
    pub root: Option<String>,
}

#[derive(Debug, Serialize)]
struct DepthOutput {
    root: Option<String>,
    /// Reachable nodes in discovery order.
    depths: IndexMap<String, usize>,
}

/// Execute `dg depth`.
pub fn run_depth(
    args: &DepthArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.manifest.file, output)?;
    let root = args.root.as_deref().or(config.root.as_deref());

    let depths = compute_depth(&graph, root).or_else(|err| fail(output, err))?;
    // The start node is always discovered first.
    let payload = DepthOutput {
        root: depths.keys().next().cloned(),
        depths,
    };

    render_mode(output, &payload, render_depth_text, render_depth_pretty)
}

fn render_depth_text(payload: &DepthOutput, w: &mut dyn Write) -> io::Result<()> {
    for (name, depth) in &payload.depths {
        writeln!(w, "{depth} {name}")?;
    }
    Ok(())
}

fn render_depth_pretty(payload: &DepthOutput, w: &mut dyn Write) -> io::Result<()> {
    let Some(root) = &payload.root else {
        writeln!(w, "No root node to start from.")?;
        return Ok(());
    };

    pretty_section(w, &format!("Depth from {root}"))?;
    for (name, depth) in &payload.depths {
        writeln!(w, "{depth:>5}  {name}")?;
    }
    Ok(())
}
