//! The four retrieval strategies behind a single dispatch seam.
//!
//! Every planner returns the same [`PlanResult`] shape and never errors on
//! empty input — an empty retrieval is a zero-confidence result, not a
//! failure. The orchestrator selects exactly one planner per classified
//! intent via [`planner_for`]; no other component branches on intent.

pub mod causal;
pub mod entity_timeline;
pub mod similarity;
pub mod temporal;

use std::collections::BTreeSet;

use uuid::Uuid;

use causeway_core::config::QueryConfig;
use causeway_core::errors::CausewayResult;
use causeway_core::intent::Intent;
use causeway_core::models::{ChainNode, Event, TimeRange};
use causeway_core::traits::{IEmbeddingProvider, IGraphStore, IRelationalStore};

pub use causal::CausalPlanner;
pub use entity_timeline::EntityTimelinePlanner;
pub use similarity::SimilarityPlanner;
pub use temporal::TemporalPlanner;

/// Unified result type returned by all query planners.
#[derive(Debug, Clone, Default)]
pub struct PlanResult {
    /// Full event rows retrieved for this query.
    pub events: Vec<Event>,
    /// Ordered causal-chain records (possibly empty).
    pub causal_chain: Vec<ChainNode>,
    /// Documents referenced by the returned events, for source citations.
    pub document_ids: BTreeSet<Uuid>,
    /// Planner-level confidence estimate [0.0 – 1.0].
    pub confidence: f64,
}

impl PlanResult {
    /// The zero-confidence empty result.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Everything a planner may consult: long-lived store/provider handles
/// plus the per-request resolved filters.
pub struct PlannerContext<'a> {
    pub store: &'a dyn IRelationalStore,
    pub graph: &'a dyn IGraphStore,
    pub embedder: &'a dyn IEmbeddingProvider,
    pub config: &'a QueryConfig,
    pub question: &'a str,
    pub entity_id: Option<Uuid>,
    pub time_range: Option<TimeRange>,
    pub max_hops: usize,
}

/// A retrieval strategy.
pub trait QueryPlanner: Send + Sync {
    fn plan(&self, ctx: &PlannerContext<'_>) -> CausewayResult<PlanResult>;
}

/// Dispatch table keyed on the classified intent.
pub fn planner_for(intent: Intent) -> &'static dyn QueryPlanner {
    match intent {
        Intent::CausalWhy => &CausalPlanner,
        Intent::TemporalRange => &TemporalPlanner,
        Intent::Similarity => &SimilarityPlanner,
        Intent::EntityTimeline => &EntityTimelinePlanner,
    }
}

/// Collect the owning documents of a result set.
pub(crate) fn document_ids(events: &[Event]) -> BTreeSet<Uuid> {
    events.iter().map(|event| event.document_id).collect()
}
