//! Depth and transitive-reachability queries.
//!
//! Both walk outgoing edges only (dependant → dependency).

use std::collections::{BTreeSet, VecDeque};

use depgraph_core::{DepGraph, GraphError, Result};
use fixedbitset::FixedBitSet;
use indexmap::IndexMap;
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// Depth (BFS)
// ---------------------------------------------------------------------------

/// Breadth-first distance from `root` to every node reachable from it.
///
/// With `root = None` the first root node (in insertion order) is used; a
/// graph without roots yields an empty map. The root maps to 0 and nodes
/// that cannot be reached are absent. Entries are in BFS discovery order.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if an explicit `root` is not in the
/// graph.
#[instrument(level = "debug", skip(graph), fields(nodes = graph.node_count()))]
pub fn compute_depth(graph: &DepGraph, root: Option<&str>) -> Result<IndexMap<String, usize>> {
    let start = match root {
        Some(name) => graph
            .position(name)
            .ok_or_else(|| GraphError::NodeNotFound {
                name: name.to_string(),
            })?,
        None => match graph.in_degrees().iter().position(|&d| d == 0) {
            Some(pos) => pos,
            None => return Ok(IndexMap::new()),
        },
    };

    let mut depth: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut discovered: Vec<usize> = vec![start];
    let mut queue: VecDeque<usize> = VecDeque::from([start]);
    depth[start] = Some(0);

    while let Some(node) = queue.pop_front() {
        let next = depth[node].map_or(0, |d| d + 1);
        for &dep in graph.successors(node) {
            if depth[dep].is_none() {
                depth[dep] = Some(next);
                discovered.push(dep);
                queue.push_back(dep);
            }
        }
    }

    debug!(reached = discovered.len(), "depth computed");
    Ok(discovered
        .into_iter()
        .filter_map(|pos| depth[pos].map(|d| (graph.name_at(pos).to_string(), d)))
        .collect())
}

// ---------------------------------------------------------------------------
// Transitive dependencies (DFS)
// ---------------------------------------------------------------------------

/// Every node reachable from `node` in one or more steps.
///
/// `node` itself is never included, even when a cycle leads back to it.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if `node` is not in the graph.
#[instrument(level = "debug", skip(graph), fields(nodes = graph.node_count()))]
pub fn transitive_deps(graph: &DepGraph, node: &str) -> Result<BTreeSet<String>> {
    let start = graph
        .position(node)
        .ok_or_else(|| GraphError::NodeNotFound {
            name: node.to_string(),
        })?;

    let mut seen = FixedBitSet::with_capacity(graph.node_count());
    seen.insert(start);
    let mut stack: Vec<usize> = graph.successors(start).iter().copied().collect();
    let mut reached = BTreeSet::new();

    while let Some(cur) = stack.pop() {
        if seen.put(cur) {
            continue;
        }
        reached.insert(graph.name_at(cur).to_string());
        stack.extend(graph.successors(cur).iter().copied().filter(|&p| !seen.contains(p)));
    }

    debug!(reached = reached.len(), "transitive deps computed");
    Ok(reached)
}
