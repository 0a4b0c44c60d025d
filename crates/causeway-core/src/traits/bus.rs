use crate::errors::CausewayResult;

/// Message-bus producer used to decouple ingestion from NLP processing.
///
/// Delivery is at-least-once; downstream handlers are idempotent. Publish
/// failure is logged and non-fatal — the document stays persisted either
/// way.
pub trait IEventBus: Send + Sync {
    /// Publish an event envelope. `key` is an optional partition key
    /// (typically the document id).
    fn publish(
        &self,
        event_type: &str,
        payload: serde_json::Value,
        key: Option<&str>,
    ) -> CausewayResult<()>;
}
