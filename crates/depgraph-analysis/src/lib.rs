#![forbid(unsafe_code)]
//! depgraph-analysis library.
//!
//! Structural analyses over a finished [`DepGraph`]:
//!
//! ```text
//! DepGraph
//!   ├─ cycles::detect_cycles                     → Vec<Vec<String>>
//!   ├─ ordering::topological_sort                → Result<Vec<String>>
//!   ├─ reachability::compute_depth               → Result<IndexMap<String, usize>>
//!   ├─ reachability::transitive_deps             → Result<BTreeSet<String>>
//!   ├─ components::strongly_connected_components → Vec<Vec<String>>
//!   └─ stats::graph_stats                        → GraphStats
//! ```
//!
//! Every engine borrows the graph immutably and keeps its traversal state in
//! a context struct local to the call, so analyses over one shared snapshot
//! may run concurrently. All traversals use explicit stacks; deep chains do
//! not grow the call stack.
//!
//! # Conventions
//!
//! - **Errors**: [`depgraph_core::GraphError`] for the two failure modes
//!   (missing node, cyclic sort). Everything else is total.
//! - **Logging**: `tracing` spans at `debug` level; no output without a
//!   subscriber.
//!
//! [`DepGraph`]: depgraph_core::DepGraph

pub mod components;
pub mod cycles;
pub mod ordering;
pub mod reachability;
pub mod stats;

pub use components::strongly_connected_components;
pub use cycles::detect_cycles;
pub use ordering::topological_sort;
pub use reachability::{compute_depth, transitive_deps};
pub use stats::{GraphStats, graph_stats};
