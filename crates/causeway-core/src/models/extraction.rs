//! Output contracts of the NLP extraction pipeline.
//!
//! The pipeline itself is an external collaborator; the persistence and
//! sync layers treat these records as opaque data to persist and mirror.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One extracted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedEvent {
    pub description: String,
    pub event_type: Option<String>,
    pub ts_start: Option<DateTime<Utc>>,
    pub ts_end: Option<DateTime<Utc>>,
    pub confidence: f64,
    pub source_sentence: Option<String>,
    /// Surface forms of the entities involved in this event.
    pub subjects: Vec<String>,
}

/// One linked (deduplicated-within-document) entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedEntity {
    /// Raw surface form observed in the document.
    pub name: String,
    pub canonical_name: String,
    pub entity_type: String,
    pub confidence: f64,
    pub description: Option<String>,
}

/// One extracted cause → effect relation. Clauses reference extracted
/// events by description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedRelation {
    pub cause: String,
    pub effect: String,
    pub confidence: f64,
    /// Cue phrase or sentence that signals the causal link.
    pub evidence: Option<String>,
}

/// Everything the pipeline produced for one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub events: Vec<ExtractedEvent>,
    pub entities: Vec<LinkedEntity>,
    pub relations: Vec<ExtractedRelation>,
}
