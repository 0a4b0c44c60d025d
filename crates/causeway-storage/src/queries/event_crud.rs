//! Event insert, get, bulk get, delete.

use rusqlite::{params, Connection};
use uuid::Uuid;

use causeway_core::errors::CausewayResult;
use causeway_core::models::Event;

use super::vector_search::{bytes_to_f32_vec, f32_vec_to_bytes};
use crate::{parse_ts, parse_uuid, to_storage_err};

pub(crate) const EVENT_COLUMNS: &str = "id, description, event_type, ts_start, ts_end, \
     confidence, source_sentence, document_id, embedding, embedding_dims, created_at";

pub(crate) struct RawEvent {
    id: String,
    description: String,
    event_type: Option<String>,
    ts_start: Option<String>,
    ts_end: Option<String>,
    confidence: f64,
    source_sentence: Option<String>,
    document_id: String,
    embedding: Option<Vec<u8>>,
    embedding_dims: Option<i64>,
    created_at: String,
}

pub(crate) fn read_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEvent> {
    Ok(RawEvent {
        id: row.get(0)?,
        description: row.get(1)?,
        event_type: row.get(2)?,
        ts_start: row.get(3)?,
        ts_end: row.get(4)?,
        confidence: row.get(5)?,
        source_sentence: row.get(6)?,
        document_id: row.get(7)?,
        embedding: row.get(8)?,
        embedding_dims: row.get(9)?,
        created_at: row.get(10)?,
    })
}

pub(crate) fn into_event(raw: RawEvent) -> CausewayResult<Event> {
    let embedding = match (raw.embedding, raw.embedding_dims) {
        (Some(blob), Some(dims)) => Some(bytes_to_f32_vec(&blob, dims as usize)),
        _ => None,
    };
    Ok(Event {
        id: parse_uuid(&raw.id)?,
        description: raw.description,
        event_type: raw.event_type,
        ts_start: raw.ts_start.as_deref().map(parse_ts).transpose()?,
        ts_end: raw.ts_end.as_deref().map(parse_ts).transpose()?,
        confidence: raw.confidence,
        source_sentence: raw.source_sentence,
        document_id: parse_uuid(&raw.document_id)?,
        embedding,
        created_at: parse_ts(&raw.created_at)?,
    })
}

pub fn insert_event(conn: &Connection, event: &Event) -> CausewayResult<()> {
    let blob = event.embedding.as_ref().map(|e| f32_vec_to_bytes(e));
    let dims = event.embedding.as_ref().map(|e| e.len() as i64);

    conn.execute(
        "INSERT INTO events (
            id, description, event_type, ts_start, ts_end, confidence,
            source_sentence, document_id, embedding, embedding_dims, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            event.id.to_string(),
            event.description,
            event.event_type,
            event.ts_start.map(|t| t.to_rfc3339()),
            event.ts_end.map(|t| t.to_rfc3339()),
            event.confidence,
            event.source_sentence,
            event.document_id.to_string(),
            blob,
            dims,
            event.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_event(conn: &Connection, id: Uuid) -> CausewayResult<Option<Event>> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rows = stmt
        .query_map(params![id.to_string()], read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;

    match rows.next() {
        Some(raw) => Ok(Some(into_event(
            raw.map_err(|e| to_storage_err(e.to_string()))?,
        )?)),
        None => Ok(None),
    }
}

/// Fetch a batch of events by id, ordered by ts_start ascending (NULLs
/// last). Missing ids are skipped.
pub fn get_events(conn: &Connection, ids: &[Uuid]) -> CausewayResult<Vec<Event>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = (1..=ids.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE id IN ({placeholders})
         ORDER BY CASE WHEN ts_start IS NULL THEN 1 ELSE 0 END, ts_start ASC, created_at ASC"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let id_strings: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    let rows = stmt
        .query_map(rusqlite::params_from_iter(id_strings.iter()), read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut events = Vec::new();
    for raw in rows {
        events.push(into_event(raw.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(events)
}

/// Delete an event by primary key. Returns true if a row was deleted.
/// CASCADE constraints on event_entities and causal_relations handle
/// cleanup.
pub fn delete_event(conn: &Connection, id: Uuid) -> CausewayResult<bool> {
    let affected = conn
        .execute("DELETE FROM events WHERE id = ?1", params![id.to_string()])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(affected > 0)
}
