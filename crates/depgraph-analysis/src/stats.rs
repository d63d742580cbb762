//! Summary statistics for the dependency graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: size of the graph.
//! - **root_nodes**: nodes nothing depends on (top-level dependants).
//! - **leaf_nodes** / **leaf_count**: nodes with no dependencies.
//! - **max_depth**: longest BFS distance from the first root; 0 without roots.
//! - **has_cycles** / **cycle_count** / **cycles**: output of
//!   [`detect_cycles`], one entry per back-edge.
//! - **avg_direct_deps**: `edge_count / node_count`, rounded to two decimal
//!   places; 0.0 for an empty graph.
//!
//! [`graph_stats`] runs each engine once and does no traversal of its own.

use depgraph_core::DepGraph;
use serde::Serialize;
use tracing::instrument;

use crate::cycles::detect_cycles;
use crate::reachability::compute_depth;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Nodes with no incoming edges, in insertion order.
    pub root_nodes: Vec<String>,
    /// Nodes with no outgoing edges, in insertion order.
    pub leaf_nodes: Vec<String>,
    pub leaf_count: usize,
    /// Maximum depth reachable from the first root.
    pub max_depth: usize,
    pub has_cycles: bool,
    pub cycle_count: usize,
    pub cycles: Vec<Vec<String>>,
    /// Average out-degree, rounded to 2 decimal places.
    pub avg_direct_deps: f64,
}

/// Compute summary statistics about the graph.
#[must_use]
#[instrument(level = "debug", skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn graph_stats(graph: &DepGraph) -> GraphStats {
    let root_nodes: Vec<String> = graph.roots().into_iter().map(str::to_string).collect();
    let leaf_nodes: Vec<String> = graph.leaves().into_iter().map(str::to_string).collect();

    // Default root selection is the first root, which is exactly what
    // `compute_depth(.., None)` does; it cannot fail without an explicit root.
    let max_depth = compute_depth(graph, None)
        .ok()
        .and_then(|depths| depths.values().copied().max())
        .unwrap_or(0);

    let cycles = detect_cycles(graph);

    GraphStats {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        leaf_count: leaf_nodes.len(),
        root_nodes,
        leaf_nodes,
        max_depth,
        has_cycles: !cycles.is_empty(),
        cycle_count: cycles.len(),
        cycles,
        avg_direct_deps: average_out_degree(graph.node_count(), graph.edge_count()),
    }
}

#[allow(clippy::cast_precision_loss)]
fn average_out_degree(node_count: usize, edge_count: usize) -> f64 {
    if node_count == 0 {
        return 0.0_f64;
    }
    let avg = edge_count as f64 / node_count as f64;
    // Half-way cases round to even.
    (avg * 100.0).round_ties_even() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
