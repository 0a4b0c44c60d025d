//! Causal relation CRUD.

use rusqlite::{params, Connection};
use uuid::Uuid;

use causeway_core::errors::CausewayResult;
use causeway_core::models::CausalRelation;

use crate::{parse_ts, parse_uuid, to_storage_err};

const RELATION_COLUMNS: &str =
    "id, cause_event_id, effect_event_id, confidence, evidence, created_at";

struct RawRelation {
    id: String,
    cause_event_id: String,
    effect_event_id: String,
    confidence: f64,
    evidence: Option<String>,
    created_at: String,
}

fn read_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRelation> {
    Ok(RawRelation {
        id: row.get(0)?,
        cause_event_id: row.get(1)?,
        effect_event_id: row.get(2)?,
        confidence: row.get(3)?,
        evidence: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn into_relation(raw: RawRelation) -> CausewayResult<CausalRelation> {
    Ok(CausalRelation {
        id: parse_uuid(&raw.id)?,
        cause_event_id: parse_uuid(&raw.cause_event_id)?,
        effect_event_id: parse_uuid(&raw.effect_event_id)?,
        confidence: raw.confidence,
        evidence: raw.evidence,
        created_at: parse_ts(&raw.created_at)?,
    })
}

fn collect(
    stmt: &mut rusqlite::Statement<'_>,
    params: impl rusqlite::Params,
) -> CausewayResult<Vec<CausalRelation>> {
    let rows = stmt
        .query_map(params, read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut relations = Vec::new();
    for raw in rows {
        relations.push(into_relation(
            raw.map_err(|e| to_storage_err(e.to_string()))?,
        )?);
    }
    Ok(relations)
}

pub fn insert_relation(conn: &Connection, relation: &CausalRelation) -> CausewayResult<()> {
    conn.execute(
        "INSERT INTO causal_relations (id, cause_event_id, effect_event_id, confidence, evidence, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            relation.id.to_string(),
            relation.cause_event_id.to_string(),
            relation.effect_event_id.to_string(),
            relation.confidence,
            relation.evidence,
            relation.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Relations involving the event as cause and/or effect. Both flags false
/// yields an empty list.
pub fn relations_for_event(
    conn: &Connection,
    event_id: Uuid,
    as_cause: bool,
    as_effect: bool,
) -> CausewayResult<Vec<CausalRelation>> {
    let condition = match (as_cause, as_effect) {
        (true, true) => "cause_event_id = ?1 OR effect_event_id = ?1",
        (true, false) => "cause_event_id = ?1",
        (false, true) => "effect_event_id = ?1",
        (false, false) => return Ok(Vec::new()),
    };
    let sql = format!("SELECT {RELATION_COLUMNS} FROM causal_relations WHERE {condition}");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect(&mut stmt, params![event_id.to_string()])
}

/// Relations whose cause event belongs to the given set (per-document
/// sync).
pub fn relations_from_events(
    conn: &Connection,
    event_ids: &[Uuid],
) -> CausewayResult<Vec<CausalRelation>> {
    if event_ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = (1..=event_ids.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {RELATION_COLUMNS} FROM causal_relations
         WHERE cause_event_id IN ({placeholders})"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let id_strings: Vec<String> = event_ids.iter().map(|id| id.to_string()).collect();
    collect(&mut stmt, rusqlite::params_from_iter(id_strings.iter()))
}

/// Paginated listing ordered by created_at, for the full resync.
pub fn list_relations(
    conn: &Connection,
    offset: usize,
    limit: usize,
) -> CausewayResult<Vec<CausalRelation>> {
    let sql = format!(
        "SELECT {RELATION_COLUMNS} FROM causal_relations
         ORDER BY created_at ASC, id ASC LIMIT ?1 OFFSET ?2"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect(&mut stmt, params![limit as i64, offset as i64])
}

/// Delete a relation by primary key. Returns true if a row was deleted.
pub fn delete_relation(conn: &Connection, id: Uuid) -> CausewayResult<bool> {
    let affected = conn
        .execute(
            "DELETE FROM causal_relations WHERE id = ?1",
            params![id.to_string()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(affected > 0)
}
