//! Fingerprint → document-id registry for ingest deduplication.

use rusqlite::{params, Connection};
use uuid::Uuid;

use causeway_core::errors::CausewayResult;

use crate::{parse_uuid, to_storage_err};

/// The document id that first registered this fingerprint, if any.
pub fn get(conn: &Connection, fingerprint: &str) -> CausewayResult<Option<Uuid>> {
    let mut stmt = conn
        .prepare("SELECT document_id FROM document_fingerprints WHERE fingerprint = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![fingerprint], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    match rows.next() {
        Some(raw) => Ok(Some(parse_uuid(
            &raw.map_err(|e| to_storage_err(e.to_string()))?,
        )?)),
        None => Ok(None),
    }
}

/// Register a fingerprint for a fresh document. `INSERT OR IGNORE` keeps
/// the original owner if the fingerprint is already present.
pub fn register(conn: &Connection, fingerprint: &str, document_id: Uuid) -> CausewayResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO document_fingerprints (fingerprint, document_id) VALUES (?1, ?2)",
        params![fingerprint, document_id.to_string()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
