//! Brute-force cosine-distance similarity search over stored embeddings.

use rusqlite::Connection;
use uuid::Uuid;

use causeway_core::errors::CausewayResult;
use causeway_core::models::Event;

use super::event_crud;
use crate::to_storage_err;

/// Return events ranked by cosine distance to the query embedding,
/// nearest-first, excluding rows beyond `max_distance`.
///
/// Cosine distance is 1 − cosine similarity: 0 for identical direction,
/// 1 for orthogonal, 2 for opposite. Rows with a different stored dimension
/// are skipped without deserializing the full vector.
pub fn search_vector(
    conn: &Connection,
    query_embedding: &[f32],
    limit: usize,
    max_distance: f64,
) -> CausewayResult<Vec<(Event, f64)>> {
    let scored = scan_distances(conn, query_embedding, None)?;
    collect_nearest(conn, scored, limit, Some(max_distance))
}

/// Vector search restricted to the given event ids. No distance ceiling —
/// the candidate set is already narrow.
pub fn search_vector_among(
    conn: &Connection,
    event_ids: &[Uuid],
    query_embedding: &[f32],
    limit: usize,
) -> CausewayResult<Vec<(Event, f64)>> {
    if event_ids.is_empty() {
        return Ok(Vec::new());
    }
    let scored = scan_distances(conn, query_embedding, Some(event_ids))?;
    collect_nearest(conn, scored, limit, None)
}

/// Scan embeddings and compute (event_id, cosine_distance) pairs.
fn scan_distances(
    conn: &Connection,
    query_embedding: &[f32],
    restrict_to: Option<&[Uuid]>,
) -> CausewayResult<Vec<(String, f64)>> {
    let query_norm_sq: f64 = query_embedding
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum();
    if query_norm_sq == 0.0 {
        return Ok(Vec::new());
    }
    let query_len = query_embedding.len();

    let mut sql = String::from(
        "SELECT id, embedding, embedding_dims FROM events WHERE embedding IS NOT NULL",
    );
    let mut id_strings: Vec<String> = Vec::new();
    if let Some(ids) = restrict_to {
        let placeholders = (1..=ids.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        sql.push_str(&format!(" AND id IN ({placeholders})"));
        id_strings = ids.iter().map(|id| id.to_string()).collect();
    }

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(id_strings.iter()), |row| {
            let id: String = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            let dims: i64 = row.get(2)?;
            Ok((id, blob, dims))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored: Vec<(String, f64)> = Vec::new();
    for row in rows {
        let (id, blob, dims) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if dims as usize != query_len {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, dims as usize);
        scored.push((id, cosine_distance(query_embedding, &stored)));
    }
    Ok(scored)
}

/// Sort ascending by distance, apply the optional ceiling, truncate, and
/// fetch the full event rows.
fn collect_nearest(
    conn: &Connection,
    mut scored: Vec<(String, f64)>,
    limit: usize,
    max_distance: Option<f64>,
) -> CausewayResult<Vec<(Event, f64)>> {
    if let Some(ceiling) = max_distance {
        scored.retain(|(_, dist)| *dist <= ceiling);
    }
    scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);

    let mut results = Vec::with_capacity(scored.len());
    for (id, dist) in scored {
        let event_id = crate::parse_uuid(&id)?;
        if let Some(event) = event_crud::get_event(conn, event_id)? {
            results.push((event, dist));
        }
    }
    Ok(results)
}

/// Convert an f32 slice to bytes (little-endian).
pub(crate) fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes back to an f32 vec.
pub(crate) fn bytes_to_f32_vec(bytes: &[u8], expected_dims: usize) -> Vec<f32> {
    let mut result = Vec::with_capacity(expected_dims);
    for chunk in bytes.chunks_exact(4) {
        result.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    result
}

/// Cosine distance (1 − cosine similarity) between two vectors.
fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum::<f64>()
        .sqrt();
    let norm_b: f64 = b
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum::<f64>()
        .sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}
