//! Synchronizer tests: persistence, per-document sync, full resync, and
//! the idempotence guarantees that make replay safe.

use chrono::Utc;
use uuid::Uuid;

use causeway_core::models::{
    Document, ExtractedEvent, ExtractedRelation, ExtractionOutput, LinkedEntity,
};
use causeway_core::traits::{IGraphStore, IRelationalStore};
use causeway_graph::GraphEngine;
use causeway_storage::StorageEngine;
use causeway_sync::{persist_extraction, sync_all, sync_document, SyncReport};

fn make_document(store: &StorageEngine, source: &str) -> Uuid {
    let document = Document {
        id: Uuid::new_v4(),
        source: source.to_string(),
        filename: None,
        text: format!("text of {source}"),
        metadata: None,
        created_at: Utc::now(),
    };
    store.insert_document(&document).unwrap();
    document.id
}

fn extracted_event(description: &str, subjects: &[&str]) -> ExtractedEvent {
    ExtractedEvent {
        description: description.to_string(),
        event_type: Some("occurrence".to_string()),
        ts_start: None,
        ts_end: None,
        confidence: 0.9,
        source_sentence: None,
        subjects: subjects.iter().map(|s| s.to_string()).collect(),
    }
}

/// Two events involving one entity, connected by one causal relation.
fn sample_output() -> ExtractionOutput {
    ExtractionOutput {
        events: vec![
            extracted_event("Supply chain disruptions occurred", &["Acme Corp"]),
            extracted_event("Revenue declined", &["Acme Corp"]),
        ],
        entities: vec![LinkedEntity {
            name: "Acme Corp".to_string(),
            canonical_name: "Acme Corp".to_string(),
            entity_type: "ORG".to_string(),
            confidence: 0.95,
            description: None,
        }],
        relations: vec![ExtractedRelation {
            cause: "Supply chain disruptions occurred".to_string(),
            effect: "Revenue declined".to_string(),
            confidence: 0.8,
            evidence: Some("led to".to_string()),
        }],
    }
}

#[test]
fn persist_extraction_counts_and_rows() {
    let store = StorageEngine::open_in_memory().unwrap();
    let document_id = make_document(&store, "rpt1");

    let report = persist_extraction(&store, document_id, &sample_output(), None).unwrap();
    assert_eq!(report.events, 2);
    assert_eq!(report.entities, 1);
    assert_eq!(report.links, 2);
    assert_eq!(report.relations, 1);

    let (entities, total) = store.list_entities(None, None, 0, 10).unwrap();
    assert_eq!(total, 1);
    let event_ids = store.event_ids_for_entity(entities[0].id).unwrap();
    assert_eq!(event_ids.len(), 2);
}

#[test]
fn persist_extraction_attaches_embeddings_by_index() {
    let store = StorageEngine::open_in_memory().unwrap();
    let document_id = make_document(&store, "rpt1");
    let embeddings = vec![vec![1.0_f32, 0.0], vec![0.0_f32, 1.0]];

    persist_extraction(&store, document_id, &sample_output(), Some(&embeddings)).unwrap();

    let results = store.vector_search(&[1.0, 0.0], 10, 2.0).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0.description, "Supply chain disruptions occurred");
}

#[test]
fn repeated_persist_does_not_duplicate_entities() {
    let store = StorageEngine::open_in_memory().unwrap();
    let first = make_document(&store, "rpt1");
    let second = make_document(&store, "rpt2");

    persist_extraction(&store, first, &sample_output(), None).unwrap();
    persist_extraction(&store, second, &sample_output(), None).unwrap();

    // Events duplicate per document; the canonical entity does not.
    let (_, entity_total) = store.list_entities(None, None, 0, 10).unwrap();
    assert_eq!(entity_total, 1);
}

#[test]
fn sync_document_writes_nodes_then_edges() {
    let store = StorageEngine::open_in_memory().unwrap();
    let graph = GraphEngine::new();
    let document_id = make_document(&store, "rpt1");
    persist_extraction(&store, document_id, &sample_output(), None).unwrap();

    let report = sync_document(&store, &graph, document_id).unwrap();
    assert_eq!(
        report,
        SyncReport {
            event_nodes: 2,
            entity_nodes: 1,
            involves_edges: 2,
            causes_edges: 1,
        }
    );
    assert_eq!(graph.node_count().unwrap(), 3);
    assert_eq!(graph.edge_count().unwrap(), 3);
}

#[test]
fn sync_document_twice_is_idempotent() {
    let store = StorageEngine::open_in_memory().unwrap();
    let graph = GraphEngine::new();
    let document_id = make_document(&store, "rpt1");
    persist_extraction(&store, document_id, &sample_output(), None).unwrap();

    let first = sync_document(&store, &graph, document_id).unwrap();
    let nodes = graph.node_count().unwrap();
    let edges = graph.edge_count().unwrap();

    let second = sync_document(&store, &graph, document_id).unwrap();
    assert_eq!(first, second);
    assert_eq!(graph.node_count().unwrap(), nodes);
    assert_eq!(graph.edge_count().unwrap(), edges);
}

#[test]
fn sync_document_with_no_events_is_a_zero_report() {
    let store = StorageEngine::open_in_memory().unwrap();
    let graph = GraphEngine::new();
    let document_id = make_document(&store, "empty");

    let report = sync_document(&store, &graph, document_id).unwrap();
    assert_eq!(report, SyncReport::default());
    assert_eq!(graph.node_count().unwrap(), 0);
}

#[test]
fn sync_all_rebuilds_an_empty_graph() {
    let store = StorageEngine::open_in_memory().unwrap();
    let first = make_document(&store, "rpt1");
    let second = make_document(&store, "rpt2");
    persist_extraction(&store, first, &sample_output(), None).unwrap();
    persist_extraction(&store, second, &sample_output(), None).unwrap();

    let graph = GraphEngine::new();
    // Tiny batch size exercises the pagination loops.
    let report = sync_all(&store, &graph, 1).unwrap();

    assert_eq!(report.event_nodes, 4);
    assert_eq!(report.entity_nodes, 1);
    assert_eq!(report.involves_edges, 4);
    assert_eq!(report.causes_edges, 2);
    assert_eq!(graph.node_count().unwrap(), 5);
    assert_eq!(graph.edge_count().unwrap(), 6);
}

#[test]
fn sync_all_after_document_sync_changes_nothing() {
    let store = StorageEngine::open_in_memory().unwrap();
    let graph = GraphEngine::new();
    let document_id = make_document(&store, "rpt1");
    persist_extraction(&store, document_id, &sample_output(), None).unwrap();

    sync_document(&store, &graph, document_id).unwrap();
    let nodes = graph.node_count().unwrap();
    let edges = graph.edge_count().unwrap();

    sync_all(&store, &graph, 100).unwrap();
    assert_eq!(graph.node_count().unwrap(), nodes);
    assert_eq!(graph.edge_count().unwrap(), edges);
}

#[test]
fn reports_combine_additively_across_batches() {
    let a = SyncReport {
        event_nodes: 2,
        entity_nodes: 1,
        involves_edges: 2,
        causes_edges: 1,
    };
    let b = SyncReport {
        event_nodes: 3,
        entity_nodes: 0,
        involves_edges: 1,
        causes_edges: 2,
    };
    let combined = a + b;
    assert_eq!(combined.event_nodes, 5);
    assert_eq!(combined.entity_nodes, 1);
    assert_eq!(combined.involves_edges, 3);
    assert_eq!(combined.causes_edges, 3);
}
