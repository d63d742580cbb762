//! `dg deps`: everything a node depends on, directly or transitively.

use std::io::{self, Write};

use clap::Args;
use depgraph_analysis::transitive_deps;
use serde::Serialize;

use crate::cmd::{ManifestArg, fail, load_graph};
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `dg deps`.
#[derive(Args, Debug)]
pub struct DepsArgs {
    #[command(flatten)]
    pub manifest: ManifestArg,

    /// Node whose dependencies to list.
    pub node: String,
}

#[derive(Debug, Serialize)]
struct DepsOutput {
    node: String,
    count: usize,
    /// Sorted by name.
    dependencies: Vec<String>,
}

/// Execute `dg deps`.
pub fn run_deps(args: &DepsArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.manifest.file, output)?;
    let deps = transitive_deps(&graph, &args.node).or_else(|err| fail(output, err))?;

    let payload = DepsOutput {
        node: args.node.clone(),
        count: deps.len(),
        dependencies: deps.into_iter().collect(),
    };

    render_mode(output, &payload, render_deps_text, render_deps_pretty)
}

fn render_deps_text(payload: &DepsOutput, w: &mut dyn Write) -> io::Result<()> {
    for dep in &payload.dependencies {
        writeln!(w, "{dep}")?;
    }
    Ok(())
}

fn render_deps_pretty(payload: &DepsOutput, w: &mut dyn Write) -> io::Result<()> {
    if payload.dependencies.is_empty() {
        writeln!(w, "{} has no dependencies.", payload.node)?;
        return Ok(());
    }

    pretty_section(
        w,
        &format!(
            "Transitive dependencies of {} ({})",
            payload.node, payload.count
        ),
    )?;
    for dep in &payload.dependencies {
        writeln!(w, "  - {dep}")?;
    }
    Ok(())
}
