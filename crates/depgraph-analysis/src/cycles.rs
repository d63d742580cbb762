//! Cycle enumeration for the dependency graph.
//!
//! # Overview
//!
//! Circular dependencies make a package set impossible to install or build
//! in order. [`detect_cycles`] reports each loop as a concrete path of node
//! names whose first and last elements are equal, e.g. `a → b → c → a`.
//!
//! # Design
//!
//! - **Three-color DFS**: unvisited, in-progress (on the active path), done.
//!   An edge into an in-progress node is a back-edge and closes a cycle.
//! - **Iterative**: an explicit stack of `(node, cursor)` frames replaces the
//!   call stack, so a chain of tens of thousands of packages is fine.
//! - **One cycle per back-edge**: no deduplication and no minimal cycle
//!   basis. Overlapping loops that share nodes are reported independently.
//! - **O(V+E)** time, O(V) auxiliary space.

use depgraph_core::DepGraph;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    InProgress,
    Done,
}

/// One DFS frame: a node and the index of its next unexplored successor.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    cursor: usize,
}

/// Find cycles reachable from every node, in insertion order.
///
/// Returns the empty list iff the graph is acyclic. A self-loop `a → a` is
/// reported as `["a", "a"]`.
#[must_use]
#[instrument(level = "debug", skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn detect_cycles(graph: &DepGraph) -> Vec<Vec<String>> {
    let n = graph.node_count();
    let mut color = vec![Color::Unvisited; n];
    // parent[v] = the node that discovered v; valid while v is in progress.
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut stack: Vec<Frame> = Vec::new();
    let mut cycles: Vec<Vec<String>> = Vec::new();

    for start in 0..n {
        if color[start] != Color::Unvisited {
            continue;
        }

        color[start] = Color::InProgress;
        stack.push(Frame {
            node: start,
            cursor: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let u = frame.node;
            let Some(&v) = graph.successors(u).get_index(frame.cursor) else {
                color[u] = Color::Done;
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            match color[v] {
                Color::InProgress => cycles.push(reconstruct_cycle(graph, &parent, u, v)),
                Color::Unvisited => {
                    parent[v] = Some(u);
                    color[v] = Color::InProgress;
                    stack.push(Frame { node: v, cursor: 0 });
                }
                Color::Done => {}
            }
        }
    }

    debug!(cycles = cycles.len(), "cycle scan complete");
    cycles
}

/// Rebuild the loop closed by back-edge `u → v`.
///
/// Parent links run `u → ... → v` backwards along the active path; reversing
/// them gives `v → ... → u`, and the back-edge closes it at `v` again.
fn reconstruct_cycle(graph: &DepGraph, parent: &[Option<usize>], u: usize, v: usize) -> Vec<String> {
    let mut path: Vec<usize> = vec![v, u];
    let mut cursor = u;

    while cursor != v {
        let Some(next) = parent[cursor] else {
            break;
        };
        cursor = next;
        path.push(cursor);
    }

    path.reverse();
    path.into_iter()
        .map(|pos| graph.name_at(pos).to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use depgraph_core::build_graph;

    fn graph_from_edges(edges: &[(&str, &str)]) -> DepGraph {
        let mut graph = DepGraph::new();
        for &(from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    #[test]
    fn empty_graph_has_no_cycles() {
        assert!(detect_cycles(&DepGraph::new()).is_empty());
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let graph = build_graph([
            ("app", vec!["auth", "db"]),
            ("auth", vec!["crypto"]),
            ("db", vec!["pool"]),
        ]);
        assert!(detect_cycles(&graph).is_empty());
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        // Reaching c a second time through b hits a finished node.
        let graph = graph_from_edges(&[("app", "a"), ("app", "b"), ("a", "c"), ("b", "c")]);
        assert!(detect_cycles(&graph).is_empty());
    }

    #[test]
    fn three_node_cycle_path() {
        let graph = graph_from_edges(&[("a", "b"), ("b", "c"), ("c", "a")]);
        assert_eq!(detect_cycles(&graph), vec![vec!["a", "b", "c", "a"]]);
    }

    #[test]
    fn two_node_cycle_path() {
        let graph = graph_from_edges(&[("a", "b"), ("b", "a")]);
        assert_eq!(detect_cycles(&graph), vec![vec!["a", "b", "a"]]);
    }

    #[test]
    fn self_loop_is_a_one_cycle() {
        let graph = graph_from_edges(&[("a", "a")]);
        assert_eq!(detect_cycles(&graph), vec![vec!["a", "a"]]);
    }

    #[test]
    fn cycle_not_through_start_node() {
        // app → x → y → x: the loop starts at x, not at the traversal root.
        let graph = graph_from_edges(&[("app", "x"), ("x", "y"), ("y", "x")]);
        assert_eq!(detect_cycles(&graph), vec![vec!["x", "y", "x"]]);
    }

    #[test]
    fn one_cycle_per_back_edge() {
        // b → a and c → a are both back-edges into the active path.
        let graph = graph_from_edges(&[("a", "b"), ("b", "a"), ("b", "c"), ("c", "a")]);
        let cycles = detect_cycles(&graph);

        assert_eq!(cycles.len(), 2, "overlapping loops are reported separately");
        assert_eq!(cycles[0], vec!["a", "b", "a"]);
        assert_eq!(cycles[1], vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn disjoint_cycles_are_all_found() {
        let graph = graph_from_edges(&[("a", "b"), ("b", "a"), ("c", "d"), ("d", "c")]);
        let cycles = detect_cycles(&graph);
        assert_eq!(cycles, vec![vec!["a", "b", "a"], vec!["c", "d", "c"]]);
    }

    #[test]
    fn every_cycle_is_closed_and_follows_edges() {
        let graph = graph_from_edges(&[
            ("a", "b"),
            ("b", "c"),
            ("c", "a"),
            ("c", "d"),
            ("d", "b"),
            ("d", "d"),
        ]);
        let cycles = detect_cycles(&graph);
        assert!(!cycles.is_empty());

        for cycle in &cycles {
            assert!(cycle.len() >= 2);
            assert_eq!(cycle.first(), cycle.last(), "cycle must be closed: {cycle:?}");
            for pair in cycle.windows(2) {
                assert!(
                    graph.has_edge(&pair[0], &pair[1]),
                    "{} → {} is not an edge",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let mut graph = DepGraph::new();
        for i in 0..50_000 {
            graph.add_edge(&format!("n{i}"), &format!("n{}", i + 1));
        }
        assert!(detect_cycles(&graph).is_empty());

        graph.add_edge("n50000", "n0");
        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 50_002);
    }

    #[test]
    fn rerun_is_identical() {
        let graph = graph_from_edges(&[("a", "b"), ("b", "c"), ("c", "a"), ("c", "c")]);
        assert_eq!(detect_cycles(&graph), detect_cycles(&graph));
    }
}
