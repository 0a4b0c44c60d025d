//! The shared ingestion pipeline: normalize → deduplicate → persist →
//! publish.

use chrono::Utc;
use uuid::Uuid;

use causeway_core::errors::{CausewayError, CausewayResult, QueryError};
use causeway_core::models::{Document, IngestReceipt, IngestRequest, IngestStatus};
use causeway_core::traits::{IDedupRegistry, IEventBus, IRelationalStore};

use crate::fingerprint::fingerprint;
use crate::normalizer::normalize;

/// Ingest raw text and return a receipt immediately; NLP extraction and
/// graph sync run out of band in the bus consumer.
///
/// Empty text after normalization is the one genuine client error on this
/// path. An already-seen fingerprint returns the original document id with
/// status `Duplicate`. Bus publish failure is logged and non-fatal — the
/// document stays persisted regardless.
pub fn ingest_text(
    store: &dyn IRelationalStore,
    registry: &dyn IDedupRegistry,
    bus: &dyn IEventBus,
    request: &IngestRequest,
) -> CausewayResult<IngestReceipt> {
    let normalized = normalize(&request.text);
    if normalized.is_empty() {
        return Err(CausewayError::Query(QueryError::EmptyDocument));
    }

    let digest = fingerprint(&normalized);
    if let Some(existing_id) = registry.get(&digest)? {
        tracing::info!(
            source = %request.source,
            existing_id = %existing_id,
            "ingest: duplicate"
        );
        return Ok(IngestReceipt {
            document_id: existing_id,
            source: request.source.clone(),
            filename: request.filename.clone(),
            status: IngestStatus::Duplicate,
            message: "Document already exists.".to_string(),
        });
    }

    let document = Document {
        id: Uuid::new_v4(),
        source: request.source.clone(),
        filename: request.filename.clone(),
        text: normalized,
        metadata: request.metadata.clone(),
        created_at: Utc::now(),
    };
    store.insert_document(&document)?;
    registry.register(&digest, document.id)?;

    let payload = serde_json::json!({
        "document_id": document.id,
        "source": document.source,
        "filename": document.filename,
    });
    if let Err(error) = bus.publish(
        "document.ingested",
        payload,
        Some(&document.id.to_string()),
    ) {
        tracing::warn!(%error, document_id = %document.id, "ingest: publish failed");
    }

    tracing::info!(document_id = %document.id, source = %request.source, "ingest: accepted");
    Ok(IngestReceipt {
        document_id: document.id,
        source: request.source.clone(),
        filename: request.filename.clone(),
        status: IngestStatus::Processing,
        message: "Document accepted for processing".to_string(),
    })
}
