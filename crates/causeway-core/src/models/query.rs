//! Query request/response wire shapes exposed to the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_MAX_HOPS;

use super::chain::ChainNode;
use super::event::EventBrief;

/// UTC time-window filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A natural-language query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub question: String,
    /// Optional entity mention to filter results by.
    pub entity_filter: Option<String>,
    /// Explicit time window. Always wins over anything inferred from the
    /// question text.
    pub time_range: Option<TimeRange>,
    /// Max depth for causal chain traversal (clamped to [1, 10]).
    #[serde(default = "default_max_hops")]
    pub max_causal_hops: usize,
}

fn default_max_hops() -> usize {
    DEFAULT_MAX_HOPS
}

impl QueryRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            entity_filter: None,
            time_range: None,
            max_causal_hops: DEFAULT_MAX_HOPS,
        }
    }
}

/// A single link in an answer's causal chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CausalChainLink {
    pub id: Uuid,
    pub description: String,
    pub ts_start: Option<DateTime<Utc>>,
    pub confidence: f64,
}

impl From<&ChainNode> for CausalChainLink {
    fn from(node: &ChainNode) -> Self {
        Self {
            id: node.event_id,
            description: node.description.clone(),
            ts_start: node.ts_start,
            confidence: node.confidence,
        }
    }
}

/// Reference to a source document backing an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReference {
    pub id: Uuid,
    pub source: String,
    pub metadata: Option<serde_json::Value>,
}

/// The final answer returned to the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    /// Planner confidence, rounded to 4 decimal places.
    pub confidence: f64,
    /// Classified intent label, echoed verbatim.
    pub intent: String,
    pub causal_chain: Vec<CausalChainLink>,
    pub events: Vec<EventBrief>,
    pub sources: Vec<SourceReference>,
}
