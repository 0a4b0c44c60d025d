use crate::errors::CausewayResult;

/// Per-call generation parameters.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Model override; None uses the provider's configured default.
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Request timeout override in seconds.
    pub timeout_secs: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.3,
            max_tokens: 2048,
            timeout_secs: None,
        }
    }
}

/// Text-generation provider.
///
/// Implementations must surface failures as errors — never silently return
/// empty text. Callers that have a deterministic fallback recover locally.
pub trait ILlmProvider: Send + Sync {
    fn generate(&self, prompt: &str, options: &GenerateOptions) -> CausewayResult<String>;

    /// Whether the provider is currently reachable.
    fn is_healthy(&self) -> bool;
}
