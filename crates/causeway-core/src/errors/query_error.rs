/// Query/ingestion pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The one genuine client error on the ingestion path.
    #[error("document text is empty after normalization")]
    EmptyDocument,
}
