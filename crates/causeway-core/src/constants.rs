//! Workspace-wide tuning constants.

/// Minimum string-similarity ratio to accept a fuzzy entity match.
pub const FUZZY_THRESHOLD: f64 = 0.75;

/// Maximum substring-match candidates loaded for alias/fuzzy checking.
pub const CANDIDATE_LIMIT: usize = 20;

/// Number of seed events used as causal-graph entry points.
pub const SEED_LIMIT: usize = 3;

/// Maximum cosine distance for causal seed similarity search.
pub const SEED_MAX_DISTANCE: f64 = 0.8;

/// Cosine distance ceiling for the similarity planner.
pub const SIMILARITY_MAX_DISTANCE: f64 = 0.9;

/// Default result limit for the similarity planner.
pub const SIMILARITY_DEFAULT_LIMIT: usize = 10;

/// Default result limit for temporal and entity-timeline planners.
pub const TIMELINE_DEFAULT_LIMIT: usize = 50;

/// Maximum event nodes returned by an entity-centered subgraph.
pub const SUBGRAPH_MAX_EVENTS: usize = 50;

/// Causal traversal hop bounds. Out-of-range requests are clamped, not
/// rejected.
pub const MIN_HOPS: usize = 1;
pub const MAX_HOPS: usize = 10;

/// Default traversal depth when the caller does not specify one.
pub const DEFAULT_MAX_HOPS: usize = 3;

/// Rows per page during a full relational→graph resync.
pub const RESYNC_BATCH_SIZE: usize = 500;
