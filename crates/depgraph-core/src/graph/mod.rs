//! Dependency graph store.
//!
//! # Overview
//!
//! [`DepGraph`] is a directed graph keyed by node name. Edges go from the
//! dependant to the dependency:
//!
//! ```text
//! add_edge("app", "flask")   means   app depends on flask
//! ```
//!
//! Nodes keep their insertion order, and so do each node's outgoing edges.
//! Every analysis walks the graph in that order, so results are
//! deterministic for a given construction sequence.
//!
//! ## Pipeline
//!
//! ```text
//! { name: [deps] } mapping (from a manifest parser)
//!        ↓  build::build_graph()
//! DepGraph (read-only from here on)
//!        ↓  depgraph-analysis engines
//! cycles / order / depth / reachability / SCCs / GraphStats
//! ```
//!
//! ## Cache Invalidation
//!
//! [`DepGraph::content_hash`] is a BLAKE3 hash of the node and edge sets.
//! Compare it against a stored value to detect when cached analysis output
//! is stale.

pub mod build;
pub mod store;

pub use build::build_graph;
pub use store::{DepGraph, Neighbors};
