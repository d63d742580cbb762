//! Graph construction from a `{ name: [dependencies] }` mapping.
//!
//! # Overview
//!
//! Every manifest parser reduces its dialect to the same shape: an ordered
//! mapping from a package name to the names it depends on. [`build_graph`]
//! turns that mapping into a [`DepGraph`]:
//!
//! - every key becomes a node, even when its dependency list is empty;
//! - every listed dependency becomes an edge `key → dependency`;
//! - dependency-only names become nodes the first time they are seen.
//!
//! Duplicate dependencies in one list collapse to a single edge.
//!
//! ## Cache Invalidation
//!
//! [`DepGraph::content_hash`] hashes node names (in insertion order) and
//! edges, so it changes whenever the graph's shape changes. Versions and
//! metadata are descriptive and do not contribute.

use tracing::{debug, instrument};

use crate::graph::store::DepGraph;
use crate::node::Metadata;

/// Construct a [`DepGraph`] from a `{ name: [dependencies] }` mapping.
///
/// Accepts anything that iterates `(name, deps)` pairs: a slice of tuples,
/// an `IndexMap<String, Vec<String>>` by reference, and so on. Keys are
/// inserted in iteration order.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn build_graph<I, K, D, S>(deps: I) -> DepGraph
where
    I: IntoIterator<Item = (K, D)>,
    K: AsRef<str>,
    D: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut graph = DepGraph::new();
    for (parent, children) in deps {
        let parent = parent.as_ref();
        graph.add_node(parent, None, Metadata::new());
        for child in children {
            graph.add_edge(parent, child.as_ref());
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built dependency graph"
    );
    graph
}

impl DepGraph {
    /// BLAKE3 fingerprint of the graph's shape, formatted `blake3:<hex>`.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for name in self.node_names() {
            hasher.update(name.as_bytes());
            hasher.update(b"\x00");
        }
        hasher.update(b"\x01");
        for pos in 0..self.node_count() {
            for &to in self.successors(pos) {
                hasher.update(self.name_at(pos).as_bytes());
                hasher.update(b"\x00");
                hasher.update(self.name_at(to).as_bytes());
                hasher.update(b"\x00");
            }
        }
        format!("blake3:{}", hasher.finalize())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
