//! Configuration sections, each with serde defaults backed by the
//! `defaults` constants module. Loadable from TOML; every field is
//! optional in the file.

pub mod defaults;
pub mod ollama_config;
pub mod query_config;
pub mod sync_config;

use serde::{Deserialize, Serialize};

pub use ollama_config::OllamaConfig;
pub use query_config::QueryConfig;
pub use sync_config::SyncConfig;

/// Top-level configuration for the whole engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CausewayConfig {
    pub ollama: OllamaConfig,
    pub query: QueryConfig,
    pub sync: SyncConfig,
}

impl CausewayConfig {
    /// Parse a TOML document, filling missing fields with defaults.
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = CausewayConfig::from_toml("").unwrap();
        assert_eq!(config.ollama.embedding_dimension, 384);
        assert_eq!(config.sync.batch_size, 500);
    }

    #[test]
    fn partial_section_overrides() {
        let config = CausewayConfig::from_toml(
            "[ollama]\nbase_url = \"http://ollama:11434\"\n",
        )
        .unwrap();
        assert_eq!(config.ollama.base_url, "http://ollama:11434");
        assert_eq!(config.ollama.synthesis_model, "llama3.1:8b");
    }
}
