//! v002: events with embedded vector BLOBs.

use rusqlite::Connection;

use causeway_core::errors::CausewayResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> CausewayResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS events (
            id              TEXT PRIMARY KEY,
            description     TEXT NOT NULL,
            event_type      TEXT,
            ts_start        TEXT,
            ts_end          TEXT,
            confidence      REAL NOT NULL DEFAULT 1.0,
            source_sentence TEXT,
            document_id     TEXT NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            embedding       BLOB,
            embedding_dims  INTEGER,
            created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_events_document ON events(document_id);
        CREATE INDEX IF NOT EXISTS idx_events_ts_start ON events(ts_start);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
