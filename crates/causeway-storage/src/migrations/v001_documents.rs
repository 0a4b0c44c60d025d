//! v001: documents, document_fingerprints.

use rusqlite::Connection;

use causeway_core::errors::CausewayResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> CausewayResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            id         TEXT PRIMARY KEY,
            source     TEXT NOT NULL,
            filename   TEXT,
            text       TEXT NOT NULL,
            metadata   TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_documents_source ON documents(source);

        CREATE TABLE IF NOT EXISTS document_fingerprints (
            fingerprint TEXT PRIMARY KEY,
            document_id TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
