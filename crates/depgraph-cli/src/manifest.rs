//! Construction-input files.
//!
//! A manifest is a JSON object or TOML table mapping each package name to
//! either a plain list of dependency names or a detailed entry:
//!
//! ```toml
//! app = ["auth", "db"]
//!
//! [auth]
//! version = "2.1"
//! deps = ["crypto"]
//! metadata = { license = "MIT" }
//! ```
//!
//! Entries are read in document order, which becomes node insertion order.

use std::path::Path;

use anyhow::{Context, Result};
use depgraph_core::{DepGraph, Metadata, build_graph};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, instrument};

/// One package entry in a manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Deps(Vec<String>),
    Package(PackageEntry),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageEntry {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub deps: Vec<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Entry {
    #[must_use]
    pub fn deps(&self) -> &[String] {
        match self {
            Self::Deps(deps) => deps,
            Self::Package(package) => &package.deps,
        }
    }
}

/// Ordered `name → entry` mapping read from a file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: IndexMap<String, Entry>,
}

impl Manifest {
    /// Parse manifest text; `.toml` files are TOML, anything else is JSON.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            toml::from_str(content).with_context(|| format!("Failed to parse {}", path.display()))
        } else {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse {}", path.display()))
        }
    }

    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest = Self::parse(&content, path)?;
        debug!(entries = manifest.entries.len(), "loaded manifest");
        Ok(manifest)
    }

    /// Build the graph, then attach versions and metadata from detailed entries.
    #[must_use]
    pub fn to_graph(&self) -> DepGraph {
        let mut graph = build_graph(self.entries.iter().map(|(name, entry)| (name, entry.deps())));
        for (name, entry) in &self.entries {
            if let Entry::Package(package) = entry {
                graph.add_node(name, package.version.as_deref(), package.metadata.clone());
            }
        }
        graph
    }
}
