//! Document CRUD.

use rusqlite::{params, Connection};
use uuid::Uuid;

use causeway_core::errors::CausewayResult;
use causeway_core::models::Document;

use crate::{parse_ts, parse_uuid, to_storage_err};

struct RawDocument {
    id: String,
    source: String,
    filename: Option<String>,
    text: String,
    metadata: Option<String>,
    created_at: String,
}

fn read_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawDocument> {
    Ok(RawDocument {
        id: row.get(0)?,
        source: row.get(1)?,
        filename: row.get(2)?,
        text: row.get(3)?,
        metadata: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn into_document(raw: RawDocument) -> CausewayResult<Document> {
    let metadata = match raw.metadata {
        Some(json) => Some(serde_json::from_str(&json)?),
        None => None,
    };
    Ok(Document {
        id: parse_uuid(&raw.id)?,
        source: raw.source,
        filename: raw.filename,
        text: raw.text,
        metadata,
        created_at: parse_ts(&raw.created_at)?,
    })
}

pub fn insert_document(conn: &Connection, document: &Document) -> CausewayResult<()> {
    let metadata_json = document
        .metadata
        .as_ref()
        .map(|m| serde_json::to_string(m))
        .transpose()?;

    conn.execute(
        "INSERT INTO documents (id, source, filename, text, metadata, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            document.id.to_string(),
            document.source,
            document.filename,
            document.text,
            metadata_json,
            document.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_document(conn: &Connection, id: Uuid) -> CausewayResult<Option<Document>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, source, filename, text, metadata, created_at
             FROM documents WHERE id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rows = stmt
        .query_map(params![id.to_string()], read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;

    match rows.next() {
        Some(raw) => Ok(Some(into_document(
            raw.map_err(|e| to_storage_err(e.to_string()))?,
        )?)),
        None => Ok(None),
    }
}

/// Fetch a batch of documents by id. Missing ids are skipped.
pub fn get_documents(conn: &Connection, ids: &[Uuid]) -> CausewayResult<Vec<Document>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = (1..=ids.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT id, source, filename, text, metadata, created_at
         FROM documents WHERE id IN ({placeholders}) ORDER BY created_at ASC"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let id_strings: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    let rows = stmt
        .query_map(rusqlite::params_from_iter(id_strings.iter()), read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut documents = Vec::new();
    for raw in rows {
        documents.push(into_document(
            raw.map_err(|e| to_storage_err(e.to_string()))?,
        )?);
    }
    Ok(documents)
}
