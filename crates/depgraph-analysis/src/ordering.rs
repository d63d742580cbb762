//! Topological ordering (Kahn's algorithm).
//!
//! Nodes come out dependants-first: for every edge `u → v`, `u` precedes `v`.
//! Ties are broken by insertion order, since the queue is seeded and fed in
//! that order.
//!
//! Cycle detection here is independent of [`crate::cycles`]: if any node is
//! left with a non-zero in-degree once the queue drains, the graph is not a
//! DAG and the sort fails outright. No partial order is ever returned.

use std::collections::VecDeque;

use depgraph_core::{DepGraph, GraphError, Result};
use tracing::{debug, instrument};

/// Return every node in topological order.
///
/// # Errors
///
/// Returns [`GraphError::Cycle`] if the graph contains a cycle (including a
/// self-loop).
#[instrument(level = "debug", skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn topological_sort(graph: &DepGraph) -> Result<Vec<String>> {
    let mut in_degree = graph.in_degrees();

    let mut queue: VecDeque<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(pos, _)| pos)
        .collect();
    let mut order: Vec<usize> = Vec::with_capacity(graph.node_count());

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &dep in graph.successors(node) {
            in_degree[dep] -= 1;
            if in_degree[dep] == 0 {
                queue.push_back(dep);
            }
        }
    }

    if order.len() != graph.node_count() {
        debug!(
            ordered = order.len(),
            total = graph.node_count(),
            "topological sort hit a cycle"
        );
        return Err(GraphError::Cycle {
            ordered: order.len(),
            total: graph.node_count(),
        });
    }

    Ok(order
        .into_iter()
        .map(|pos| graph.name_at(pos).to_string())
        .collect())
}
