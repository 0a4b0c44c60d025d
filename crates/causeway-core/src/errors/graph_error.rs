/// Causal-graph mirror errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// An edge write referenced a node that has not been upserted yet.
    /// Write ordering is nodes-before-edges; hitting this is a caller bug,
    /// not a recoverable condition.
    #[error("{edge} edge references missing node {node_id}")]
    MissingEndpoint { edge: &'static str, node_id: String },
}
