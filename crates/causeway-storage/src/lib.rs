//! # causeway-storage
//!
//! SQLite-backed relational store of record. Owns the connection pool,
//! schema migrations, and all SQL. Implements the `IRelationalStore` and
//! `IDedupRegistry` traits from causeway-core.
//!
//! The query path treats this store as read-only; writes happen on the
//! ingestion/sync path where the single write connection owns commit.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use causeway_core::errors::{CausewayError, StorageError};

/// Map an SQLite error message into the workspace error type.
pub(crate) fn to_storage_err(message: String) -> CausewayError {
    CausewayError::Storage(StorageError::SqliteError { message })
}

/// Parse a TEXT column holding a UUID.
pub(crate) fn parse_uuid(raw: &str) -> Result<uuid::Uuid, CausewayError> {
    uuid::Uuid::parse_str(raw).map_err(|e| to_storage_err(format!("bad uuid {raw}: {e}")))
}

/// Parse a TEXT column holding an RFC 3339 timestamp.
pub(crate) fn parse_ts(raw: &str) -> Result<chrono::DateTime<chrono::Utc>, CausewayError> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp {raw}: {e}")))
}
