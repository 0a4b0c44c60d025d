//! Ingestion pipeline tests: fresh vs duplicate, the empty-text client
//! error, and non-fatal bus failures.

use std::sync::atomic::{AtomicUsize, Ordering};

use causeway_core::errors::{CausewayError, CausewayResult, ProviderError, QueryError};
use causeway_core::models::{IngestRequest, IngestStatus};
use causeway_core::traits::{IEventBus, IRelationalStore};
use causeway_ingest::ingest_text;
use causeway_storage::StorageEngine;

/// Records publishes; optionally fails every call.
struct RecordingBus {
    published: AtomicUsize,
    fail: bool,
}

impl RecordingBus {
    fn new(fail: bool) -> Self {
        Self {
            published: AtomicUsize::new(0),
            fail,
        }
    }
}

impl IEventBus for RecordingBus {
    fn publish(
        &self,
        _event_type: &str,
        _payload: serde_json::Value,
        _key: Option<&str>,
    ) -> CausewayResult<()> {
        self.published.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CausewayError::Provider(ProviderError::Unavailable {
                provider: "bus".into(),
                reason: "broker down".into(),
            }));
        }
        Ok(())
    }
}

fn request(text: &str, source: &str) -> IngestRequest {
    IngestRequest {
        text: text.to_string(),
        source: source.to_string(),
        filename: None,
        metadata: None,
    }
}

#[test]
fn fresh_document_is_accepted_for_processing() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let bus = RecordingBus::new(false);

    let receipt = ingest_text(
        &engine,
        &engine,
        &bus,
        &request("Supply chain disruptions led to a revenue decline.", "rpt1"),
    )
    .unwrap();

    assert_eq!(receipt.status, IngestStatus::Processing);
    assert_eq!(receipt.source, "rpt1");
    assert_eq!(bus.published.load(Ordering::SeqCst), 1);

    // The document row holds the normalized text.
    let document = engine.get_document(receipt.document_id).unwrap().unwrap();
    assert_eq!(
        document.text,
        "Supply chain disruptions led to a revenue decline."
    );
}

#[test]
fn identical_text_is_a_duplicate_of_the_original() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let bus = RecordingBus::new(false);
    let text = "Supply chain disruptions led to a revenue decline.";

    let first = ingest_text(&engine, &engine, &bus, &request(text, "rpt1")).unwrap();
    let second = ingest_text(&engine, &engine, &bus, &request(text, "rpt2")).unwrap();

    assert_eq!(first.status, IngestStatus::Processing);
    assert_eq!(second.status, IngestStatus::Duplicate);
    assert_eq!(second.document_id, first.document_id);
    // No second publish for a duplicate.
    assert_eq!(bus.published.load(Ordering::SeqCst), 1);
}

#[test]
fn whitespace_variants_normalize_to_the_same_fingerprint() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let bus = RecordingBus::new(false);

    let first = ingest_text(
        &engine,
        &engine,
        &bus,
        &request("Margins  fell \r\nin Q3.", "rpt1"),
    )
    .unwrap();
    let second = ingest_text(
        &engine,
        &engine,
        &bus,
        &request("  Margins fell\nin Q3. ", "rpt2"),
    )
    .unwrap();

    assert_eq!(second.status, IngestStatus::Duplicate);
    assert_eq!(second.document_id, first.document_id);
}

#[test]
fn empty_after_normalization_is_a_client_error() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let bus = RecordingBus::new(false);

    let result = ingest_text(&engine, &engine, &bus, &request("  \n\t \r\n ", "rpt1"));
    assert!(matches!(
        result,
        Err(CausewayError::Query(QueryError::EmptyDocument))
    ));
    assert_eq!(bus.published.load(Ordering::SeqCst), 0);
}

#[test]
fn bus_failure_is_non_fatal() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let bus = RecordingBus::new(true);

    let receipt = ingest_text(
        &engine,
        &engine,
        &bus,
        &request("The merger closed in March 2024.", "rpt1"),
    )
    .unwrap();

    // Publish was attempted, failed, and the document stayed persisted.
    assert_eq!(bus.published.load(Ordering::SeqCst), 1);
    assert_eq!(receipt.status, IngestStatus::Processing);
    assert!(engine.get_document(receipt.document_id).unwrap().is_some());
}
