//! Graph data structure: petgraph storage with id-keyed indexes.

pub mod indexed;

pub use indexed::{EdgeWeight, IndexedGraph, NodeWeight};
