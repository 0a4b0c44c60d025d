//! Versioned schema migrations, applied in order on startup.

pub mod v001_documents;
pub mod v002_events;
pub mod v003_entities;
pub mod v004_causal_relations;

use rusqlite::Connection;

use causeway_core::errors::{CausewayError, CausewayResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> CausewayResult<()>;

/// (version, migration) pairs in application order.
const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_documents::migrate),
    (2, v002_events::migrate),
    (3, v003_entities::migrate),
    (4, v004_causal_relations::migrate),
];

/// Apply every migration newer than the recorded schema version.
pub fn run_migrations(conn: &Connection) -> CausewayResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            CausewayError::Storage(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(version, "migration applied");
    }
    Ok(())
}
