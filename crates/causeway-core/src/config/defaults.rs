//! Default configuration values.

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_SYNTHESIS_MODEL: &str = "llama3.1:8b";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 384;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
