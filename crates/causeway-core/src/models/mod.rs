//! Domain models shared across the workspace.

pub mod chain;
pub mod document;
pub mod entity;
pub mod event;
pub mod extraction;
pub mod graph;
pub mod query;
pub mod relation;

pub use chain::{ChainNode, Direction};
pub use document::{Document, IngestReceipt, IngestRequest, IngestStatus};
pub use entity::{Entity, ResolveMethod, ResolvedEntity};
pub use event::{Event, EventBrief};
pub use extraction::{ExtractedEvent, ExtractedRelation, ExtractionOutput, LinkedEntity};
pub use graph::{CausesEdge, EntityNode, EntitySubgraph, EventNode, SubgraphEdge};
pub use query::{CausalChainLink, QueryRequest, QueryResponse, SourceReference, TimeRange};
pub use relation::{CausalRelation, EventEntity};
