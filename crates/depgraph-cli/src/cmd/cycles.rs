//! `dg cycles`: list circular dependencies.

use std::io::{self, Write};

use clap::Args;
use depgraph_analysis::detect_cycles;
use serde::Serialize;

use crate::cmd::{ManifestArg, load_graph};
use crate::output::{OutputMode, render_mode};

/// Arguments for `dg cycles`.
#[derive(Args, Debug)]
pub struct CyclesArgs {
    #[command(flatten)]
    pub manifest: ManifestArg,
}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    count: usize,
    cycles: Vec<Vec<String>>,
}

/// Execute `dg cycles`.
///
/// Finding cycles is a successful result; the exit code stays zero.
pub fn run_cycles(args: &CyclesArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.manifest.file, output)?;
    let cycles = detect_cycles(&graph);
    let payload = CyclesOutput {
        count: cycles.len(),
        cycles,
    };

    render_mode(output, &payload, render_cycles_text, render_cycles_pretty)
}

fn render_cycles_text(payload: &CyclesOutput, w: &mut dyn Write) -> io::Result<()> {
    for cycle in &payload.cycles {
        writeln!(w, "{}", cycle.join(" -> "))?;
    }
    Ok(())
}

fn render_cycles_pretty(payload: &CyclesOutput, w: &mut dyn Write) -> io::Result<()> {
    if payload.cycles.is_empty() {
        writeln!(w, "No circular dependencies found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} cycle(s):", payload.count)?;
    for (idx, cycle) in payload.cycles.iter().enumerate() {
        writeln!(w, "  {}. {}", idx + 1, cycle.join(" → "))?;
    }
    Ok(())
}
