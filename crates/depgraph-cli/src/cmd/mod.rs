pub mod analyze;
pub mod completions;
pub mod cycles;
pub mod deps;
pub mod depth;
pub mod scc;
pub mod stats;

use std::path::{Path, PathBuf};

use clap::Args;
use depgraph_core::{DepGraph, GraphError};
use tracing::debug;

use crate::manifest::Manifest;
use crate::output::{CliError, OutputMode, render_error};

/// Manifest argument shared by every analysis command.
#[derive(Args, Debug, Clone)]
pub struct ManifestArg {
    /// JSON or TOML file mapping each package to its dependencies.
    pub file: PathBuf,
}

/// Load a manifest and build its graph, rendering load failures.
pub fn load_graph(path: &Path, output: OutputMode) -> anyhow::Result<DepGraph> {
    let manifest = match Manifest::load(path) {
        Ok(manifest) => manifest,
        Err(err) => {
            render_error(
                output,
                &CliError::with_details(
                    format!("{err:#}"),
                    "provide a JSON object or TOML table of name → [dependencies]",
                    "manifest_invalid",
                ),
            )?;
            return Err(err);
        }
    };

    let graph = manifest.to_graph();
    debug!(
        file = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Render a graph error to stderr and fail the command with it.
pub fn fail<T>(output: OutputMode, err: GraphError) -> anyhow::Result<T> {
    render_error(output, &CliError::from(&err))?;
    Err(err.into())
}
