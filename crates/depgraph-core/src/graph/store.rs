//! The [`DepGraph`] adjacency store.
//!
//! Nodes live in an insertion-ordered map; outgoing edges are stored per node
//! as an insertion-ordered set of node *positions* (the node's index in
//! insertion order). Positions are stable because nodes are never removed,
//! which lets the analysis engines keep their traversal state in dense
//! vectors instead of name-keyed maps.

#![allow(clippy::module_name_repetitions)]

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::error::{GraphError, Result};
use crate::node::{Metadata, Node};

// ---------------------------------------------------------------------------
// DepGraph
// ---------------------------------------------------------------------------

/// Directed dependency graph with simple (non-parallel, unweighted) edges.
///
/// Built once, then treated as read-only by every analysis.
#[derive(Debug, Clone, Default)]
pub struct DepGraph {
    /// Node records keyed by name, in insertion order.
    nodes: IndexMap<String, Node>,
    /// `out[i]` holds the positions of node `i`'s direct dependencies.
    out: Vec<IndexSet<usize>>,
    edge_count: usize,
}

impl DepGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Mutators -----------------------------------------------------------

    /// Add a node, or fold the supplied version/metadata into an existing one.
    ///
    /// Re-adding never duplicates the node and never touches its edges.
    pub fn add_node(&mut self, name: &str, version: Option<&str>, metadata: Metadata) -> &Node {
        let pos = self.ensure_node(name);
        let node = &mut self.nodes[pos];
        node.merge(version, metadata);
        node
    }

    /// Add the directed edge `src → dst`, creating either endpoint if needed.
    ///
    /// Returns `true` if the edge was new, `false` if it already existed.
    pub fn add_edge(&mut self, src: &str, dst: &str) -> bool {
        let from = self.ensure_node(src);
        let to = self.ensure_node(dst);
        let inserted = self.out[from].insert(to);
        if inserted {
            self.edge_count += 1;
        }
        inserted
    }

    fn ensure_node(&mut self, name: &str) -> usize {
        if let Some(pos) = self.nodes.get_index_of(name) {
            return pos;
        }
        trace!(node = name, "adding node");
        let (pos, _) = self.nodes.insert_full(name.to_string(), Node::new(name));
        self.out.push(IndexSet::new());
        pos
    }

    // -- Name-based queries -------------------------------------------------

    /// Direct dependencies (outgoing neighbors) of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `name` is not in the graph.
    pub fn neighbors(&self, name: &str) -> Result<Neighbors<'_>> {
        let pos = self
            .position(name)
            .ok_or_else(|| GraphError::not_found(name))?;
        Ok(Neighbors {
            graph: self,
            inner: self.out[pos].iter(),
        })
    }

    /// Number of direct dependencies of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `name` is not in the graph.
    pub fn out_degree(&self, name: &str) -> Result<usize> {
        self.position(name)
            .map(|pos| self.out[pos].len())
            .ok_or_else(|| GraphError::not_found(name))
    }

    #[must_use]
    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    #[must_use]
    pub fn has_edge(&self, src: &str, dst: &str) -> bool {
        match (self.position(src), self.position(dst)) {
            (Some(from), Some(to)) => self.out[from].contains(&to),
            _ => false,
        }
    }

    /// Look up a node record by name.
    #[must_use]
    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// All node records in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// All node names in insertion order.
    pub fn node_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.nodes.keys().map(String::as_str)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes with no incoming edges (top-level dependants), in insertion order.
    #[must_use]
    pub fn roots(&self) -> Vec<&str> {
        self.in_degrees()
            .into_iter()
            .enumerate()
            .filter(|&(_, degree)| degree == 0)
            .map(|(pos, _)| self.name_at(pos))
            .collect()
    }

    /// Nodes with no outgoing edges (dependencies of nothing), in insertion order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&str> {
        self.out
            .iter()
            .enumerate()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(pos, _)| self.name_at(pos))
            .collect()
    }

    // -- Position-based access for traversal engines ------------------------

    /// Insertion position of `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.nodes.get_index_of(name)
    }

    /// Name of the node at insertion position `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= self.node_count()`. Positions handed out by this
    /// graph are always in range.
    #[must_use]
    pub fn name_at(&self, pos: usize) -> &str {
        &self.nodes[pos].name
    }

    /// Positions of the direct dependencies of the node at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= self.node_count()`.
    #[must_use]
    pub fn successors(&self, pos: usize) -> &IndexSet<usize> {
        &self.out[pos]
    }

    /// In-degree of every node, indexed by position.
    #[must_use]
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0_usize; self.nodes.len()];
        for deps in &self.out {
            for &to in deps {
                degrees[to] += 1;
            }
        }
        degrees
    }
}

impl fmt::Display for DepGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DepGraph(nodes={}, edges={})",
            self.node_count(),
            self.edge_count()
        )
    }
}

// ---------------------------------------------------------------------------
// Neighbors
// ---------------------------------------------------------------------------

/// Iterator over the names of a node's direct dependencies, in insertion order.
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    graph: &'a DepGraph,
    inner: indexmap::set::Iter<'a, usize>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|&pos| self.graph.name_at(pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Neighbors<'_> {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
