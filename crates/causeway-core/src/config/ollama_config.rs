use serde::{Deserialize, Serialize};

use super::defaults;

/// Ollama provider configuration (LLM generation + embeddings).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub base_url: String,
    pub synthesis_model: String,
    pub embedding_model: String,
    /// Fixed dimension D of every stored embedding.
    pub embedding_dimension: usize,
    /// Per-request timeout (seconds).
    pub request_timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_OLLAMA_BASE_URL.to_string(),
            synthesis_model: defaults::DEFAULT_SYNTHESIS_MODEL.to_string(),
            embedding_model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dimension: defaults::DEFAULT_EMBEDDING_DIMENSION,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
