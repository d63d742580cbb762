//! `dg scc`: tightly coupled dependency clusters.

use std::io::{self, Write};

use clap::Args;
use depgraph_analysis::strongly_connected_components;
use serde::Serialize;

use crate::cmd::{ManifestArg, load_graph};
use crate::output::{OutputMode, render_mode};

/// Arguments for `dg scc`.
#[derive(Args, Debug)]
pub struct SccArgs {
    #[command(flatten)]
    pub manifest: ManifestArg,
}

#[derive(Debug, Serialize)]
struct SccOutput {
    component_count: usize,
    /// Components with more than one member, largest first.
    clusters: Vec<Vec<String>>,
    independent: usize,
}

impl SccOutput {
    fn from_components(components: Vec<Vec<String>>) -> Self {
        let component_count = components.len();
        let clusters: Vec<Vec<String>> = components.into_iter().filter(|c| c.len() > 1).collect();
        Self {
            component_count,
            independent: component_count - clusters.len(),
            clusters,
        }
    }
}

/// Execute `dg scc`.
pub fn run_scc(args: &SccArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.manifest.file, output)?;
    let payload = SccOutput::from_components(strongly_connected_components(&graph));

    render_mode(output, &payload, render_scc_text, render_scc_pretty)
}

fn render_scc_text(payload: &SccOutput, w: &mut dyn Write) -> io::Result<()> {
    for cluster in &payload.clusters {
        writeln!(w, "{}", cluster.join(" "))?;
    }
    writeln!(w, "independent {}", payload.independent)
}

fn render_scc_pretty(payload: &SccOutput, w: &mut dyn Write) -> io::Result<()> {
    if payload.clusters.is_empty() {
        writeln!(w, "No tightly-coupled clusters found.")?;
        writeln!(
            w,
            "  All {} components are independent.",
            payload.component_count
        )?;
        return Ok(());
    }

    writeln!(
        w,
        "Found {} tightly-coupled cluster(s):",
        payload.clusters.len()
    )?;
    for (idx, cluster) in payload.clusters.iter().enumerate() {
        writeln!(
            w,
            "  {}. [{} nodes] {}",
            idx + 1,
            cluster.len(),
            cluster.join(" ↔ ")
        )?;
    }
    writeln!(w, "\n  + {} independent node(s)", payload.independent)
}
