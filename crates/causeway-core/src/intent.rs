//! The four query intents that drive planner dispatch.

use serde::{Deserialize, Serialize};

/// The four supported query intent categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// "Why did revenue drop in Q3?" — cause-effect chains.
    CausalWhy,
    /// "What happened between July and September?" — time-window filter.
    TemporalRange,
    /// "Find events similar to the supply chain disruption."
    Similarity,
    /// "Show me everything about Acme Corp." — entity history.
    EntityTimeline,
}

impl Intent {
    /// Wire label used in API responses and LLM prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::CausalWhy => "CAUSAL_WHY",
            Intent::TemporalRange => "TEMPORAL_RANGE",
            Intent::Similarity => "SIMILARITY",
            Intent::EntityTimeline => "ENTITY_TIMELINE",
        }
    }

    /// Parse a label case-insensitively. Used to validate LLM output.
    pub fn from_label(label: &str) -> Option<Intent> {
        match label.trim().to_ascii_uppercase().as_str() {
            "CAUSAL_WHY" => Some(Intent::CausalWhy),
            "TEMPORAL_RANGE" => Some(Intent::TemporalRange),
            "SIMILARITY" => Some(Intent::Similarity),
            "ENTITY_TIMELINE" => Some(Intent::EntityTimeline),
            _ => None,
        }
    }

    /// All intents, in dispatch-table order.
    pub fn all() -> [Intent; 4] {
        [
            Intent::CausalWhy,
            Intent::TemporalRange,
            Intent::Similarity,
            Intent::EntityTimeline,
        ]
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
