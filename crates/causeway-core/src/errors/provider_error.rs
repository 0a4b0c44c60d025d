/// External-service failures (embedding, LLM, message bus).
///
/// These are recovered locally with a deterministic fallback wherever one
/// exists (synthesis, intent classification) and re-raised only where no
/// safe default exists (a planner's mandatory similarity search).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider} unavailable: {reason}")]
    Unavailable { provider: String, reason: String },

    #[error("{provider} timed out after {seconds}s")]
    Timeout { provider: String, seconds: u64 },

    #[error("{provider} returned an invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
}
