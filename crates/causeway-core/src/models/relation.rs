use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directed cause → effect edge between two events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CausalRelation {
    pub id: Uuid,
    pub cause_event_id: Uuid,
    pub effect_event_id: Uuid,
    /// Extraction confidence for this causal link [0.0 – 1.0].
    pub confidence: f64,
    /// Source phrase or sentence that signals the causal link.
    pub evidence: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Join row: "event involves entity". Carries no independent identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntity {
    pub event_id: Uuid,
    pub entity_id: Uuid,
}
