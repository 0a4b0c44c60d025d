use serde::{Deserialize, Serialize};

use crate::constants;

/// Query-path limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Result limit for the similarity planner.
    pub similarity_limit: usize,
    /// Result limit for temporal and entity-timeline planners.
    pub timeline_limit: usize,
    /// Event cap for entity-centered subgraphs.
    pub subgraph_max_events: usize,
    /// Traversal depth when the request does not specify one.
    pub default_max_hops: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            similarity_limit: constants::SIMILARITY_DEFAULT_LIMIT,
            timeline_limit: constants::TIMELINE_DEFAULT_LIMIT,
            subgraph_max_events: constants::SUBGRAPH_MAX_EVENTS,
            default_max_hops: constants::DEFAULT_MAX_HOPS,
        }
    }
}
