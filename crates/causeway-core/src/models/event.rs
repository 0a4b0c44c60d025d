use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An extracted occurrence. Created once by extraction, immutable thereafter.
/// Deleting an event cascades its join-table and causal-relation rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// UUID v4 identifier.
    pub id: Uuid,
    /// Human-readable event description.
    pub description: String,
    /// Optional type tag (action, state_change, declaration, occurrence).
    pub event_type: Option<String>,
    /// Event start timestamp (UTC).
    pub ts_start: Option<DateTime<Utc>>,
    /// Event end timestamp (UTC), None for point-in-time events.
    pub ts_end: Option<DateTime<Utc>>,
    /// Extraction confidence score [0.0 – 1.0].
    pub confidence: f64,
    /// Original sentence the event was extracted from.
    pub source_sentence: Option<String>,
    /// Owning document.
    pub document_id: Uuid,
    /// Dense embedding vector, fixed dimension D.
    pub embedding: Option<Vec<f32>>,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
}

/// Compact event representation for causal chains and result lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBrief {
    pub id: Uuid,
    pub description: String,
    pub ts_start: Option<DateTime<Utc>>,
    pub confidence: f64,
}

impl From<&Event> for EventBrief {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            description: event.description.clone(),
            ts_start: event.ts_start,
            confidence: event.confidence,
        }
    }
}
