//! Strongly connected components (iterative Tarjan).
//!
//! # Overview
//!
//! An SCC is a maximal set of nodes in which every node reaches every other.
//! Components with more than one member are tightly coupled dependency
//! clusters: any package in one depends, transitively, on all the others.
//!
//! # Output Order
//!
//! [`strongly_connected_components`] returns non-trivial components (size > 1)
//! first, largest first, then the single-node components. Ties and trivial
//! components keep Tarjan's completion order. The ordering is applied by an
//! explicit sort after collection.
//!
//! # Self-loops
//!
//! Component size is the only discriminant. A node whose only cycle is an
//! edge to itself forms a size-1 component and lands among the trivial ones,
//! even though [`crate::cycles::detect_cycles`] reports it as `[a, a]`.

use depgraph_core::DepGraph;
use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

/// Decompose the graph into strongly connected components.
///
/// Every node appears in exactly one component.
#[must_use]
#[instrument(level = "debug", skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn strongly_connected_components(graph: &DepGraph) -> Vec<Vec<String>> {
    let mut tarjan = Tarjan::new(graph);
    for start in 0..graph.node_count() {
        if tarjan.index[start].is_none() {
            tarjan.run_from(start);
        }
    }

    let components: Vec<Vec<String>> = tarjan
        .components
        .into_iter()
        .map(|members| {
            members
                .into_iter()
                .map(|pos| graph.name_at(pos).to_string())
                .collect()
        })
        .collect();

    let (mut ordered, trivial): (Vec<_>, Vec<_>) =
        components.into_iter().partition(|c: &Vec<String>| c.len() > 1);
    // Stable: equal-size clusters keep completion order.
    ordered.sort_by(|a, b| b.len().cmp(&a.len()));

    debug!(
        components = ordered.len() + trivial.len(),
        non_trivial = ordered.len(),
        "scc decomposition complete"
    );
    ordered.extend(trivial);
    ordered
}

// ---------------------------------------------------------------------------
// Traversal context
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    cursor: usize,
}

/// Per-call Tarjan state, indexed by node position.
struct Tarjan<'g> {
    graph: &'g DepGraph,
    /// Discovery index; `None` until first visited.
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: FixedBitSet,
    component_stack: Vec<usize>,
    frames: Vec<Frame>,
    counter: usize,
    components: Vec<Vec<usize>>,
}

impl<'g> Tarjan<'g> {
    fn new(graph: &'g DepGraph) -> Self {
        let n = graph.node_count();
        Self {
            graph,
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: FixedBitSet::with_capacity(n),
            component_stack: Vec::new(),
            frames: Vec::new(),
            counter: 0,
            components: Vec::new(),
        }
    }

    fn discover(&mut self, node: usize) {
        self.index[node] = Some(self.counter);
        self.lowlink[node] = self.counter;
        self.counter += 1;
        self.on_stack.insert(node);
        self.component_stack.push(node);
        self.frames.push(Frame { node, cursor: 0 });
    }

    fn run_from(&mut self, start: usize) {
        let graph = self.graph;
        self.discover(start);

        while let Some(frame) = self.frames.last_mut() {
            let u = frame.node;

            if let Some(&v) = graph.successors(u).get_index(frame.cursor) {
                frame.cursor += 1;
                match self.index[v] {
                    None => self.discover(v),
                    Some(v_index) if self.on_stack.contains(v) => {
                        self.lowlink[u] = self.lowlink[u].min(v_index);
                    }
                    // Finished and already assigned to a closed component.
                    Some(_) => {}
                }
                continue;
            }

            if self.index[u] == Some(self.lowlink[u]) {
                self.close_component(u);
            }

            self.frames.pop();
            if let Some(parent) = self.frames.last() {
                let p = parent.node;
                self.lowlink[p] = self.lowlink[p].min(self.lowlink[u]);
            }
        }
    }

    /// Pop the component stack down to and including `root`.
    fn close_component(&mut self, root: usize) {
        let mut members = Vec::new();
        while let Some(w) = self.component_stack.pop() {
            self.on_stack.set(w, false);
            members.push(w);
            if w == root {
                break;
            }
        }
        self.components.push(members);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
