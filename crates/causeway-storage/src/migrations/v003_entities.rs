//! v003: entities, event_entities.

use rusqlite::Connection;

use causeway_core::errors::CausewayResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> CausewayResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entities (
            id             TEXT PRIMARY KEY,
            name           TEXT NOT NULL,
            canonical_name TEXT NOT NULL,
            entity_type    TEXT NOT NULL,
            aliases        TEXT NOT NULL DEFAULT '[]',
            description    TEXT,
            created_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_entities_canonical
            ON entities(lower(canonical_name), entity_type);
        CREATE INDEX IF NOT EXISTS idx_entities_name ON entities(name);

        CREATE TABLE IF NOT EXISTS event_entities (
            event_id  TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            entity_id TEXT NOT NULL REFERENCES entities(id) ON DELETE CASCADE,
            PRIMARY KEY (event_id, entity_id)
        );

        CREATE INDEX IF NOT EXISTS idx_event_entities_entity ON event_entities(entity_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
