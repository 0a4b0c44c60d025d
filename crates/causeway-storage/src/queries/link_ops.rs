//! event_entities join-row operations.

use rusqlite::{params, Connection};
use uuid::Uuid;

use causeway_core::errors::CausewayResult;
use causeway_core::models::EventEntity;

use crate::{parse_uuid, to_storage_err};

/// Create join rows linking the given entity ids to an event. Existing
/// links are skipped (idempotent).
pub fn link_entities_to_event(
    conn: &Connection,
    event_id: Uuid,
    entity_ids: &[Uuid],
) -> CausewayResult<()> {
    for entity_id in entity_ids {
        conn.execute(
            "INSERT OR IGNORE INTO event_entities (event_id, entity_id) VALUES (?1, ?2)",
            params![event_id.to_string(), entity_id.to_string()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

/// Ids of every event involving the entity.
pub fn event_ids_for_entity(conn: &Connection, entity_id: Uuid) -> CausewayResult<Vec<Uuid>> {
    let mut stmt = conn
        .prepare("SELECT event_id FROM event_entities WHERE entity_id = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![entity_id.to_string()], |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut ids = Vec::new();
    for raw in rows {
        ids.push(parse_uuid(&raw.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(ids)
}

/// Paginated join-row listing ordered by (event_id, entity_id), for the
/// full resync.
pub fn list_links(
    conn: &Connection,
    offset: usize,
    limit: usize,
) -> CausewayResult<Vec<EventEntity>> {
    let mut stmt = conn
        .prepare(
            "SELECT event_id, entity_id FROM event_entities
             ORDER BY event_id ASC, entity_id ASC LIMIT ?1 OFFSET ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit as i64, offset as i64], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut links = Vec::new();
    for raw in rows {
        let (event_id, entity_id) = raw.map_err(|e| to_storage_err(e.to_string()))?;
        links.push(EventEntity {
            event_id: parse_uuid(&event_id)?,
            entity_id: parse_uuid(&entity_id)?,
        });
    }
    Ok(links)
}
