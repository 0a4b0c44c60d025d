use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Traversal direction over CAUSES edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow edges forward: what did this event cause?
    Downstream,
    /// Follow edges backward: what caused this event?
    Upstream,
    /// Traverse ignoring edge direction.
    Both,
}

/// One node in a causal chain, annotated with its hop distance from the
/// seed. Constructed once at the graph-store boundary and passed onward as
/// a typed record, never as a loose map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainNode {
    pub event_id: Uuid,
    pub description: String,
    pub event_type: Option<String>,
    pub ts_start: Option<DateTime<Utc>>,
    pub confidence: f64,
    /// Number of edges traversed from the seed to this node.
    pub hop: usize,
}
