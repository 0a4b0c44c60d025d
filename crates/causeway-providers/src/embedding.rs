//! Blocking client for the Ollama embeddings API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use causeway_core::config::OllamaConfig;
use causeway_core::errors::CausewayResult;
use causeway_core::traits::IEmbeddingProvider;

use crate::{invalid_response, transport_err};

const PROVIDER: &str = "ollama-embed";
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Embedding provider with a fixed output dimension configured once.
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    dimensions: usize,
    request_timeout_secs: u64,
    client: reqwest::blocking::Client,
}

impl OllamaEmbedder {
    pub fn new(config: &OllamaConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.embedding_model.clone(),
            dimensions: config.embedding_dimension,
            request_timeout_secs: config.request_timeout_secs,
            client,
        }
    }

    fn embed_request(&self, input: Vec<&str>) -> CausewayResult<Vec<Vec<f32>>> {
        let expected = input.len();
        let body = EmbedRequest {
            model: &self.model,
            input,
        };
        let response = self
            .client
            .post(format!("{}/api/embed", self.base_url))
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .json(&body)
            .send()
            .map_err(|e| transport_err(PROVIDER, self.request_timeout_secs, e))?
            .error_for_status()
            .map_err(|e| transport_err(PROVIDER, self.request_timeout_secs, e))?;

        let parsed: EmbedResponse = response
            .json()
            .map_err(|e| invalid_response(PROVIDER, e.to_string()))?;

        if parsed.embeddings.len() != expected {
            return Err(invalid_response(
                PROVIDER,
                format!(
                    "expected {expected} embeddings, got {}",
                    parsed.embeddings.len()
                ),
            ));
        }
        for vector in &parsed.embeddings {
            if vector.len() != self.dimensions {
                return Err(invalid_response(
                    PROVIDER,
                    format!(
                        "expected dimension {}, got {}",
                        self.dimensions,
                        vector.len()
                    ),
                ));
            }
        }
        Ok(parsed.embeddings)
    }
}

impl IEmbeddingProvider for OllamaEmbedder {
    fn embed(&self, text: &str) -> CausewayResult<Vec<f32>> {
        let mut embeddings = self.embed_request(vec![text])?;
        Ok(embeddings.remove(0))
    }

    fn embed_batch(&self, texts: &[String]) -> CausewayResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.embed_request(texts.iter().map(String::as_str).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}
