//! Blocking client for the Ollama generate API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use causeway_core::config::OllamaConfig;
use causeway_core::errors::CausewayResult;
use causeway_core::traits::{GenerateOptions, ILlmProvider};

use crate::{invalid_response, transport_err};

const PROVIDER: &str = "ollama";
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: ModelOptions,
}

#[derive(Serialize)]
struct ModelOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for Ollama's single-turn completion endpoint.
pub struct OllamaClient {
    base_url: String,
    default_model: String,
    request_timeout_secs: u64,
    client: reqwest::blocking::Client,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_model: config.synthesis_model.clone(),
            request_timeout_secs: config.request_timeout_secs,
            client,
        }
    }
}

impl ILlmProvider for OllamaClient {
    fn generate(&self, prompt: &str, options: &GenerateOptions) -> CausewayResult<String> {
        let model = options.model.as_deref().unwrap_or(&self.default_model);
        let timeout_secs = options.timeout_secs.unwrap_or(self.request_timeout_secs);

        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: ModelOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(Duration::from_secs(timeout_secs))
            .json(&body)
            .send()
            .map_err(|e| transport_err(PROVIDER, timeout_secs, e))?
            .error_for_status()
            .map_err(|e| transport_err(PROVIDER, timeout_secs, e))?;

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| invalid_response(PROVIDER, e.to_string()))?;

        tracing::debug!(model, prompt_len = prompt.len(), "ollama generate");
        Ok(parsed.response)
    }

    fn is_healthy(&self) -> bool {
        self.client
            .get(&self.base_url)
            .timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .send()
            .map(|response| response.status().is_success())
            .unwrap_or(false)
    }
}
