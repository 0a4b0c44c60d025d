//! Filtered, paginated event listing with a paired total count.

use rusqlite::types::Value;
use rusqlite::Connection;

use causeway_core::errors::CausewayResult;
use causeway_core::models::Event;
use causeway_core::traits::EventFilter;

use super::event_crud::{into_event, read_raw, EVENT_COLUMNS};
use crate::to_storage_err;

/// Build the WHERE clause and positional parameters for a filter.
/// The entity filter joins through event_entities.
fn build_where(filter: &EventFilter) -> (String, String, Vec<Value>) {
    let mut joins = String::new();
    let mut conditions: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(entity_id) = filter.entity_id {
        joins.push_str(" JOIN event_entities ee ON ee.event_id = events.id");
        params.push(Value::Text(entity_id.to_string()));
        conditions.push(format!("ee.entity_id = ?{}", params.len()));
    }
    if let Some(document_id) = filter.document_id {
        params.push(Value::Text(document_id.to_string()));
        conditions.push(format!("events.document_id = ?{}", params.len()));
    }
    if let Some(from) = filter.from_date {
        params.push(Value::Text(from.to_rfc3339()));
        conditions.push(format!("events.ts_start >= ?{}", params.len()));
    }
    if let Some(to) = filter.to_date {
        params.push(Value::Text(to.to_rfc3339()));
        conditions.push(format!("events.ts_start <= ?{}", params.len()));
    }
    if let Some(event_type) = &filter.event_type {
        params.push(Value::Text(event_type.clone()));
        conditions.push(format!("events.event_type = ?{}", params.len()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    (joins, where_clause, params)
}

/// Return a paginated (results, total_count) pair matching the filter.
///
/// All filters combine with AND logic. Results are ordered by ts_start
/// ascending (NULLs last), then created_at. The count applies the same
/// filters without pagination.
pub fn list_events(
    conn: &Connection,
    filter: &EventFilter,
    offset: usize,
    limit: usize,
) -> CausewayResult<(Vec<Event>, usize)> {
    let (joins, where_clause, params) = build_where(filter);

    let count_sql = format!("SELECT COUNT(*) FROM events{joins}{where_clause}");
    let total: usize = conn
        .query_row(
            &count_sql,
            rusqlite::params_from_iter(params.iter()),
            |row| row.get::<_, i64>(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))? as usize;

    let columns = EVENT_COLUMNS
        .split(", ")
        .map(|c| format!("events.{c}"))
        .collect::<Vec<_>>()
        .join(", ");
    let mut data_params = params;
    data_params.push(Value::Integer(limit as i64));
    let limit_pos = data_params.len();
    data_params.push(Value::Integer(offset as i64));
    let offset_pos = data_params.len();

    let data_sql = format!(
        "SELECT {columns} FROM events{joins}{where_clause}
         ORDER BY CASE WHEN events.ts_start IS NULL THEN 1 ELSE 0 END,
                  events.ts_start ASC, events.created_at ASC
         LIMIT ?{limit_pos} OFFSET ?{offset_pos}"
    );
    let mut stmt = conn
        .prepare(&data_sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(data_params.iter()), read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut events = Vec::new();
    for raw in rows {
        events.push(into_event(raw.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok((events, total))
}
