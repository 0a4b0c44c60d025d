use uuid::Uuid;

use crate::errors::CausewayResult;

/// Fingerprint → document-id registry used for ingest deduplication.
///
/// The fingerprint is a content hash of the normalized text; it is kept
/// here rather than on the document row.
pub trait IDedupRegistry: Send + Sync {
    /// The document id that first registered this fingerprint, if any.
    fn get(&self, fingerprint: &str) -> CausewayResult<Option<Uuid>>;

    /// Register a fingerprint for a freshly ingested document. Re-registering
    /// an existing fingerprint leaves the original owner in place.
    fn register(&self, fingerprint: &str, document_id: Uuid) -> CausewayResult<()>;
}
