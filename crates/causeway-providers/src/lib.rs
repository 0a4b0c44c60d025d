//! # causeway-providers
//!
//! HTTP clients for the Ollama REST API, implementing the provider traits
//! from causeway-core. Every call carries a timeout; transport errors,
//! HTTP failures, and malformed response bodies all surface as
//! `ProviderError` — never as silently empty output.

pub mod embedding;
pub mod llm;

pub use embedding::OllamaEmbedder;
pub use llm::OllamaClient;

use causeway_core::errors::{CausewayError, ProviderError};

/// Map a reqwest failure to the provider error taxonomy, distinguishing
/// timeouts from general unavailability.
pub(crate) fn transport_err(
    provider: &str,
    timeout_secs: u64,
    error: reqwest::Error,
) -> CausewayError {
    if error.is_timeout() {
        CausewayError::Provider(ProviderError::Timeout {
            provider: provider.to_string(),
            seconds: timeout_secs,
        })
    } else {
        CausewayError::Provider(ProviderError::Unavailable {
            provider: provider.to_string(),
            reason: error.to_string(),
        })
    }
}

pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> CausewayError {
    CausewayError::Provider(ProviderError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    })
}
