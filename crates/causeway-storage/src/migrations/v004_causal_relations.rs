//! v004: causal_relations.

use rusqlite::Connection;

use causeway_core::errors::CausewayResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> CausewayResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS causal_relations (
            id              TEXT PRIMARY KEY,
            cause_event_id  TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            effect_event_id TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            confidence      REAL NOT NULL DEFAULT 1.0,
            evidence        TEXT,
            created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_causal_cause  ON causal_relations(cause_event_id);
        CREATE INDEX IF NOT EXISTS idx_causal_effect ON causal_relations(effect_event_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
