//! # causeway-graph
//!
//! In-process causal graph mirror of the relational store, optimized for
//! multi-hop traversal. Every write is an idempotent upsert keyed by a
//! stable id, emulating MERGE semantics: a keyed lookup under the write
//! lock followed by create-or-overwrite. Repeated and concurrent writers
//! converge to the same final state.
//!
//! The mirror is derived — the relational store is the sole source of
//! truth and the graph can be fully rebuilt from it at any time (see
//! causeway-sync).

pub mod engine;
pub mod graph;
pub mod traversal;

pub use engine::GraphEngine;
pub use graph::indexed::IndexedGraph;
