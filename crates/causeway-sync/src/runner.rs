//! The two sync entry points: per-document and full resync.
//!
//! Write order is fixed — event nodes, then the deduplicated entity set,
//! then INVOLVES edges, then CAUSES edges — because edges require their
//! endpoint nodes. An edge whose far endpoint is not mirrored yet (it
//! belongs to a document that has not synced) is skipped, not an error;
//! the full resync picks it up later.

use std::collections::HashSet;

use uuid::Uuid;

use causeway_core::errors::{CausewayError, CausewayResult, GraphError};
use causeway_core::models::{CausesEdge, EntityNode, EventNode};
use causeway_core::traits::{EventFilter, IGraphStore, IRelationalStore};

use crate::report::SyncReport;

/// Page size used when walking a document's events.
const DOCUMENT_PAGE_SIZE: usize = 500;

/// Upsert a CAUSES edge, treating a missing endpoint as a skip.
fn try_upsert_causes(graph: &dyn IGraphStore, edge: &CausesEdge) -> CausewayResult<bool> {
    match graph.upsert_causes_edge(edge) {
        Ok(()) => Ok(true),
        Err(CausewayError::Graph(GraphError::MissingEndpoint { node_id, .. })) => {
            tracing::debug!(relation_id = %edge.relation_id, node_id, "causes edge skipped");
            Ok(false)
        }
        Err(other) => Err(other),
    }
}

/// Upsert an INVOLVES edge, treating a missing endpoint as a skip.
fn try_upsert_involves(
    graph: &dyn IGraphStore,
    event_id: Uuid,
    entity_id: Uuid,
) -> CausewayResult<bool> {
    match graph.upsert_involves_edge(event_id, entity_id) {
        Ok(()) => Ok(true),
        Err(CausewayError::Graph(GraphError::MissingEndpoint { node_id, .. })) => {
            tracing::debug!(%event_id, %entity_id, node_id, "involves edge skipped");
            Ok(false)
        }
        Err(other) => Err(other),
    }
}

/// Sync all graph data for a single document. Called right after the NLP
/// pipeline finishes so the mirror reflects the new data without delay.
/// Idempotent — safe to re-run and safe to interleave across documents.
pub fn sync_document(
    store: &dyn IRelationalStore,
    graph: &dyn IGraphStore,
    document_id: Uuid,
) -> CausewayResult<SyncReport> {
    let mut report = SyncReport::default();

    // 1. Event nodes (paged; edges reference them by id).
    let filter = EventFilter {
        document_id: Some(document_id),
        ..EventFilter::default()
    };
    let mut events = Vec::new();
    let mut offset = 0;
    loop {
        let (page, _total) = store.list_events(&filter, offset, DOCUMENT_PAGE_SIZE)?;
        if page.is_empty() {
            break;
        }
        offset += page.len();
        let short_page = page.len() < DOCUMENT_PAGE_SIZE;
        events.extend(page);
        if short_page {
            break;
        }
    }

    if events.is_empty() {
        tracing::info!(%document_id, "sync_document: no events");
        return Ok(report);
    }

    for event in &events {
        graph.upsert_event_node(&EventNode::from(event))?;
    }
    report.event_nodes = events.len();

    // 2. The deduplicated entity set referenced by those events, plus the
    //    (event, entity) pairs for step 3.
    let mut seen_entities: HashSet<Uuid> = HashSet::new();
    let mut involves_pairs: Vec<(Uuid, Uuid)> = Vec::new();
    for event in &events {
        for entity in store.entities_for_event(event.id)? {
            if seen_entities.insert(entity.id) {
                graph.upsert_entity_node(&EntityNode::from(&entity))?;
                report.entity_nodes += 1;
            }
            involves_pairs.push((event.id, entity.id));
        }
    }

    // 3. INVOLVES edges.
    for (event_id, entity_id) in involves_pairs {
        if try_upsert_involves(graph, event_id, entity_id)? {
            report.involves_edges += 1;
        }
    }

    // 4. CAUSES edges whose cause belongs to this document.
    let event_ids: Vec<Uuid> = events.iter().map(|event| event.id).collect();
    for relation in store.relations_from_events(&event_ids)? {
        if try_upsert_causes(graph, &CausesEdge::from(&relation))? {
            report.causes_edges += 1;
        }
    }

    tracing::info!(
        %document_id,
        event_nodes = report.event_nodes,
        entity_nodes = report.entity_nodes,
        involves_edges = report.involves_edges,
        causes_edges = report.causes_edges,
        "sync_document complete"
    );
    Ok(report)
}

/// Re-sync every relational row into the graph mirror, in four paginated
/// passes with a bounded page size. Intended for recovery after a graph
/// outage or initial population from existing data. Idempotent — safe to
/// run repeatedly or restart after interruption.
pub fn sync_all(
    store: &dyn IRelationalStore,
    graph: &dyn IGraphStore,
    batch_size: usize,
) -> CausewayResult<SyncReport> {
    let mut total = SyncReport::default();
    let batch_size = batch_size.max(1);

    // Pass 1: event nodes.
    let mut offset = 0;
    loop {
        let (batch, _count) =
            store.list_events(&EventFilter::default(), offset, batch_size)?;
        if batch.is_empty() {
            break;
        }
        for event in &batch {
            graph.upsert_event_node(&EventNode::from(event))?;
        }
        total.event_nodes += batch.len();
        tracing::debug!(offset, count = batch.len(), "sync_all events batch");
        offset += batch.len();
        if batch.len() < batch_size {
            break;
        }
    }

    // Pass 2: entity nodes.
    let mut offset = 0;
    loop {
        let (batch, _count) = store.list_entities(None, None, offset, batch_size)?;
        if batch.is_empty() {
            break;
        }
        for entity in &batch {
            graph.upsert_entity_node(&EntityNode::from(entity))?;
        }
        total.entity_nodes += batch.len();
        tracing::debug!(offset, count = batch.len(), "sync_all entities batch");
        offset += batch.len();
        if batch.len() < batch_size {
            break;
        }
    }

    // Pass 3: INVOLVES edges.
    let mut offset = 0;
    loop {
        let batch = store.list_links(offset, batch_size)?;
        if batch.is_empty() {
            break;
        }
        for link in &batch {
            if try_upsert_involves(graph, link.event_id, link.entity_id)? {
                total.involves_edges += 1;
            }
        }
        tracing::debug!(offset, count = batch.len(), "sync_all involves batch");
        offset += batch.len();
        if batch.len() < batch_size {
            break;
        }
    }

    // Pass 4: CAUSES edges.
    let mut offset = 0;
    loop {
        let batch = store.list_relations(offset, batch_size)?;
        if batch.is_empty() {
            break;
        }
        for relation in &batch {
            if try_upsert_causes(graph, &CausesEdge::from(relation))? {
                total.causes_edges += 1;
            }
        }
        tracing::debug!(offset, count = batch.len(), "sync_all causal batch");
        offset += batch.len();
        if batch.len() < batch_size {
            break;
        }
    }

    tracing::info!(
        event_nodes = total.event_nodes,
        entity_nodes = total.entity_nodes,
        involves_edges = total.involves_edges,
        causes_edges = total.causes_edges,
        "sync_all complete"
    );
    Ok(total)
}
