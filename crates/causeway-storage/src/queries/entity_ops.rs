//! Entity upsert-merge and lookups.
//!
//! The NLP pipeline may observe the same real-world entity under different
//! surface forms ("Apple Inc.", "Apple", "AAPL"). `upsert_entity` is the
//! single write path and keeps exactly one row per
//! (lower(canonical_name), entity_type) pair, merging surface forms into
//! the aliases list.

use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use uuid::Uuid;

use causeway_core::errors::CausewayResult;
use causeway_core::models::Entity;

use crate::{parse_ts, parse_uuid, to_storage_err};

const ENTITY_COLUMNS: &str =
    "id, name, canonical_name, entity_type, aliases, description, created_at";

struct RawEntity {
    id: String,
    name: String,
    canonical_name: String,
    entity_type: String,
    aliases: String,
    description: Option<String>,
    created_at: String,
}

fn read_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEntity> {
    Ok(RawEntity {
        id: row.get(0)?,
        name: row.get(1)?,
        canonical_name: row.get(2)?,
        entity_type: row.get(3)?,
        aliases: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn into_entity(raw: RawEntity) -> CausewayResult<Entity> {
    Ok(Entity {
        id: parse_uuid(&raw.id)?,
        name: raw.name,
        canonical_name: raw.canonical_name,
        entity_type: raw.entity_type,
        aliases: serde_json::from_str(&raw.aliases)?,
        description: raw.description,
        created_at: parse_ts(&raw.created_at)?,
    })
}

/// Merge a surface form into an alias list, preserving order and skipping
/// duplicates.
fn merge_aliases(aliases: &mut Vec<String>, name: &str) {
    if !aliases.iter().any(|a| a == name) {
        aliases.push(name.to_string());
    }
}

/// Return the canonical entity for (canonical_name, entity_type), creating
/// it if absent, recording `name` as an alias and as the last-seen surface
/// form.
pub fn upsert_entity(
    conn: &Connection,
    name: &str,
    canonical_name: &str,
    entity_type: &str,
    description: Option<&str>,
) -> CausewayResult<Entity> {
    let existing = get_by_canonical_name(conn, canonical_name, entity_type)?;

    if let Some(mut entity) = existing {
        merge_aliases(&mut entity.aliases, name);
        entity.name = name.to_string();
        conn.execute(
            "UPDATE entities SET name = ?1, aliases = ?2 WHERE id = ?3",
            params![
                entity.name,
                serde_json::to_string(&entity.aliases)?,
                entity.id.to_string(),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(entity_id = %entity.id, canonical_name, "entity merged");
        return Ok(entity);
    }

    let entity = Entity {
        id: Uuid::new_v4(),
        name: name.to_string(),
        canonical_name: canonical_name.to_string(),
        entity_type: entity_type.to_string(),
        aliases: vec![name.to_string()],
        description: description.map(String::from),
        created_at: Utc::now(),
    };
    conn.execute(
        "INSERT INTO entities (id, name, canonical_name, entity_type, aliases, description, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            entity.id.to_string(),
            entity.name,
            entity.canonical_name,
            entity.entity_type,
            serde_json::to_string(&entity.aliases)?,
            entity.description,
            entity.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    tracing::debug!(entity_id = %entity.id, canonical_name, entity_type, "entity created");
    Ok(entity)
}

pub fn get_entity(conn: &Connection, id: Uuid) -> CausewayResult<Option<Entity>> {
    let sql = format!("SELECT {ENTITY_COLUMNS} FROM entities WHERE id = ?1");
    first_entity(conn, &sql, params![id.to_string()])
}

/// Case-insensitive lookup by canonical name and type.
pub fn get_by_canonical_name(
    conn: &Connection,
    canonical_name: &str,
    entity_type: &str,
) -> CausewayResult<Option<Entity>> {
    let sql = format!(
        "SELECT {ENTITY_COLUMNS} FROM entities
         WHERE lower(canonical_name) = lower(?1) AND entity_type = ?2"
    );
    first_entity(conn, &sql, params![canonical_name, entity_type])
}

fn first_entity(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> CausewayResult<Option<Entity>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params, read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;
    match rows.next() {
        Some(raw) => Ok(Some(into_entity(
            raw.map_err(|e| to_storage_err(e.to_string()))?,
        )?)),
        None => Ok(None),
    }
}

/// Paginated (results, total_count) listing. `name_query` matches
/// case-insensitively against both name columns; results are ordered by
/// canonical_name.
pub fn list_entities(
    conn: &Connection,
    name_query: Option<&str>,
    entity_type: Option<&str>,
    offset: usize,
    limit: usize,
) -> CausewayResult<(Vec<Entity>, usize)> {
    let mut conditions: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(query) = name_query {
        params.push(Value::Text(format!("%{}%", query.to_lowercase())));
        let pos = params.len();
        conditions.push(format!(
            "(lower(name) LIKE ?{pos} OR lower(canonical_name) LIKE ?{pos})"
        ));
    }
    if let Some(entity_type) = entity_type {
        params.push(Value::Text(entity_type.to_string()));
        conditions.push(format!("entity_type = ?{}", params.len()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM entities{where_clause}");
    let total: usize = conn
        .query_row(
            &count_sql,
            rusqlite::params_from_iter(params.iter()),
            |row| row.get::<_, i64>(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))? as usize;

    let mut data_params = params;
    data_params.push(Value::Integer(limit as i64));
    let limit_pos = data_params.len();
    data_params.push(Value::Integer(offset as i64));
    let offset_pos = data_params.len();

    let data_sql = format!(
        "SELECT {ENTITY_COLUMNS} FROM entities{where_clause}
         ORDER BY canonical_name ASC LIMIT ?{limit_pos} OFFSET ?{offset_pos}"
    );
    let mut stmt = conn
        .prepare(&data_sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(data_params.iter()), read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut entities = Vec::new();
    for raw in rows {
        entities.push(into_entity(
            raw.map_err(|e| to_storage_err(e.to_string()))?,
        )?);
    }
    Ok((entities, total))
}

/// Bounded candidate set for mention resolution: substring match on either
/// name column, optionally type-filtered, ordered by canonical_name.
pub fn candidates_for_mention(
    conn: &Connection,
    mention: &str,
    type_hint: Option<&str>,
    limit: usize,
) -> CausewayResult<Vec<Entity>> {
    let (entities, _total) = list_entities(conn, Some(mention), type_hint, 0, limit)?;
    Ok(entities)
}

/// All entities linked to an event via event_entities, ordered by
/// canonical_name.
pub fn entities_for_event(conn: &Connection, event_id: Uuid) -> CausewayResult<Vec<Entity>> {
    let sql = format!(
        "SELECT {columns} FROM entities e
         JOIN event_entities ee ON ee.entity_id = e.id
         WHERE ee.event_id = ?1
         ORDER BY e.canonical_name ASC",
        columns = ENTITY_COLUMNS
            .split(", ")
            .map(|c| format!("e.{c}"))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![event_id.to_string()], read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut entities = Vec::new();
    for raw in rows {
        entities.push(into_entity(
            raw.map_err(|e| to_storage_err(e.to_string()))?,
        )?);
    }
    Ok(entities)
}

/// Delete an entity. Join rows cascade. Returns true if a row was deleted.
pub fn delete_entity(conn: &Connection, id: Uuid) -> CausewayResult<bool> {
    let affected = conn
        .execute(
            "DELETE FROM entities WHERE id = ?1",
            params![id.to_string()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(affected > 0)
}
