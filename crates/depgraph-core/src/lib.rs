#![forbid(unsafe_code)]
//! depgraph-core library.
//!
//! Owns the in-memory dependency graph ([`DepGraph`]), the [`Node`] record
//! and the shared error taxonomy. The analysis engines live in
//! `depgraph-analysis` and only ever borrow a finished graph.
//!
//! # Conventions
//!
//! - **Errors**: Use [`error::Result`] (typed [`GraphError`]) for fallible queries.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`); never print.

pub mod error;
pub mod graph;
pub mod node;

pub use error::{ErrorCode, GraphError, Result};
pub use graph::{DepGraph, Neighbors, build_graph};
pub use node::{MetaValue, Metadata, Node};
