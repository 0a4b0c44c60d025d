//! Error taxonomy: one enum per subsystem, aggregated into [`CausewayError`].
//!
//! Absence is not an error: reads return `Option`, unresolved mentions and
//! temporal expressions degrade to "no filter applied".

pub mod graph_error;
pub mod provider_error;
pub mod query_error;
pub mod storage_error;

pub use graph_error::GraphError;
pub use provider_error::ProviderError;
pub use query_error::QueryError;
pub use storage_error::StorageError;

/// Umbrella error for the whole workspace.
#[derive(Debug, thiserror::Error)]
pub enum CausewayError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CausewayResult<T> = Result<T, CausewayError>;
