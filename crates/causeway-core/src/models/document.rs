use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ingested source text.
///
/// The content fingerprint used for deduplication lives in the dedup
/// registry, not on this row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    /// Source identifier (e.g. "quarterly-report").
    pub source: String,
    /// Original filename, None for raw-text ingestion.
    pub filename: Option<String>,
    /// Normalized text.
    pub text: String,
    /// Optional free-form metadata.
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Raw-text ingestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    pub text: String,
    pub source: String,
    pub filename: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Outcome of an ingestion submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    /// Fresh document, queued for NLP processing.
    Processing,
    /// Identical normalized content was ingested before; the receipt carries
    /// the original document id.
    Duplicate,
}

/// Response after submitting a document for ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReceipt {
    pub document_id: Uuid,
    pub source: String,
    pub filename: Option<String>,
    pub status: IngestStatus,
    pub message: String,
}
