//! Trait seams between the core and its collaborators.
//!
//! Handles are constructed once at process start and passed by reference
//! into every component that needs them, so each component can be tested
//! against substitute implementations.

pub mod bus;
pub mod dedup;
pub mod embedding;
pub mod graph;
pub mod llm;
pub mod storage;

pub use bus::IEventBus;
pub use dedup::IDedupRegistry;
pub use embedding::IEmbeddingProvider;
pub use graph::IGraphStore;
pub use llm::{GenerateOptions, ILlmProvider};
pub use storage::{EventFilter, IRelationalStore};
