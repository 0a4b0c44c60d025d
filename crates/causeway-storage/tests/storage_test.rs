//! Integration tests for the relational engine against in-memory SQLite.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use causeway_core::models::{CausalRelation, Document, Event};
use causeway_core::traits::{EventFilter, IDedupRegistry, IRelationalStore};
use causeway_storage::StorageEngine;

fn make_document(source: &str) -> Document {
    Document {
        id: Uuid::new_v4(),
        source: source.to_string(),
        filename: None,
        text: format!("text for {source}"),
        metadata: None,
        created_at: Utc::now(),
    }
}

fn make_event(document_id: Uuid, description: &str, ts_start: Option<(i32, u32, u32)>) -> Event {
    Event {
        id: Uuid::new_v4(),
        description: description.to_string(),
        event_type: None,
        ts_start: ts_start.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
        ts_end: None,
        confidence: 0.9,
        source_sentence: None,
        document_id,
        embedding: None,
        created_at: Utc::now(),
    }
}

fn engine_with_document() -> (StorageEngine, Document) {
    let engine = StorageEngine::open_in_memory().unwrap();
    let document = make_document("test");
    engine.insert_document(&document).unwrap();
    (engine, document)
}

#[test]
fn document_round_trip_with_metadata() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut document = make_document("rpt1");
    document.metadata = Some(serde_json::json!({"author": "jane"}));
    engine.insert_document(&document).unwrap();

    let fetched = engine.get_document(document.id).unwrap().unwrap();
    assert_eq!(fetched.source, "rpt1");
    assert_eq!(fetched.metadata, document.metadata);
    assert!(engine.get_document(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn list_events_orders_nulls_last_and_counts() {
    let (engine, document) = engine_with_document();
    let undated = make_event(document.id, "undated", None);
    let early = make_event(document.id, "early", Some((2023, 1, 5)));
    let late = make_event(document.id, "late", Some((2023, 6, 1)));
    for event in [&undated, &late, &early] {
        engine.insert_event(event).unwrap();
    }

    let (events, total) = engine
        .list_events(&EventFilter::default(), 0, 10)
        .unwrap();
    assert_eq!(total, 3);
    let descriptions: Vec<_> = events.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, vec!["early", "late", "undated"]);

    // Pagination keeps the total while trimming the page.
    let (page, total) = engine.list_events(&EventFilter::default(), 1, 1).unwrap();
    assert_eq!(total, 3);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].description, "late");
}

#[test]
fn list_events_time_window_filter() {
    let (engine, document) = engine_with_document();
    engine
        .insert_event(&make_event(document.id, "before", Some((2022, 12, 1))))
        .unwrap();
    engine
        .insert_event(&make_event(document.id, "inside", Some((2023, 3, 1))))
        .unwrap();
    engine
        .insert_event(&make_event(document.id, "after", Some((2024, 2, 1))))
        .unwrap();

    let filter = EventFilter {
        from_date: Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
        to_date: Some(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()),
        ..EventFilter::default()
    };
    let (events, total) = engine.list_events(&filter, 0, 10).unwrap();
    assert_eq!(total, 1);
    assert_eq!(events[0].description, "inside");
}

#[test]
fn entity_filter_joins_through_links() {
    let (engine, document) = engine_with_document();
    let linked = make_event(document.id, "linked", Some((2023, 1, 1)));
    let unlinked = make_event(document.id, "unlinked", Some((2023, 2, 1)));
    engine.insert_event(&linked).unwrap();
    engine.insert_event(&unlinked).unwrap();

    let entity = engine
        .upsert_entity("Acme", "Acme Corp", "ORG", None)
        .unwrap();
    engine
        .link_entities_to_event(linked.id, &[entity.id])
        .unwrap();

    let filter = EventFilter {
        entity_id: Some(entity.id),
        ..EventFilter::default()
    };
    let (events, total) = engine.list_events(&filter, 0, 10).unwrap();
    assert_eq!(total, 1);
    assert_eq!(events[0].description, "linked");
}

#[test]
fn upsert_entity_merges_instead_of_duplicating() {
    let engine = StorageEngine::open_in_memory().unwrap();

    let first = engine
        .upsert_entity("Apple Inc.", "Apple Inc.", "ORG", None)
        .unwrap();
    let second = engine
        .upsert_entity("AAPL", "apple inc.", "ORG", None)
        .unwrap();

    // Same canonical row, case-insensitively.
    assert_eq!(first.id, second.id);
    assert_eq!(second.aliases, vec!["Apple Inc.", "AAPL"]);
    // Last-seen surface form wins.
    assert_eq!(second.name, "AAPL");

    let (entities, total) = engine.list_entities(None, None, 0, 10).unwrap();
    assert_eq!(total, 1);
    assert_eq!(entities.len(), 1);

    // A different type is a different entity.
    let other = engine
        .upsert_entity("Apple", "Apple Inc.", "PRODUCT", None)
        .unwrap();
    assert_ne!(other.id, first.id);
}

#[test]
fn candidates_for_mention_substring_and_type() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .upsert_entity("Apple Inc.", "Apple Inc.", "ORG", None)
        .unwrap();
    engine
        .upsert_entity("Applied Materials", "Applied Materials", "ORG", None)
        .unwrap();
    engine
        .upsert_entity("John Smith", "John Smith", "PERSON", None)
        .unwrap();

    let candidates = engine.candidates_for_mention("appl", None, 20).unwrap();
    assert_eq!(candidates.len(), 2);
    // Ordered by canonical name.
    assert_eq!(candidates[0].canonical_name, "Apple Inc.");

    let typed = engine.candidates_for_mention("smith", Some("PERSON"), 20).unwrap();
    assert_eq!(typed.len(), 1);
    let wrong_type = engine.candidates_for_mention("smith", Some("ORG"), 20).unwrap();
    assert!(wrong_type.is_empty());
}

#[test]
fn vector_search_orders_by_distance_and_applies_ceiling() {
    let (engine, document) = engine_with_document();

    let mut near = make_event(document.id, "near", None);
    near.embedding = Some(vec![1.0, 0.1, 0.0]);
    let mut far = make_event(document.id, "far", None);
    far.embedding = Some(vec![0.0, 1.0, 0.0]);
    let mut no_embedding = make_event(document.id, "none", None);
    no_embedding.embedding = None;
    for event in [&near, &far, &no_embedding] {
        engine.insert_event(event).unwrap();
    }

    let query = vec![1.0_f32, 0.0, 0.0];
    let results = engine.vector_search(&query, 10, 2.0).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0.description, "near");
    assert!(results[0].1 < results[1].1);

    // Ceiling excludes the orthogonal event (distance 1.0).
    let close_only = engine.vector_search(&query, 10, 0.5).unwrap();
    assert_eq!(close_only.len(), 1);
    assert_eq!(close_only[0].0.description, "near");

    // Restricted search only sees the given ids.
    let among = engine
        .vector_search_among(&[far.id], &query, 10)
        .unwrap();
    assert_eq!(among.len(), 1);
    assert_eq!(among[0].0.description, "far");
}

#[test]
fn delete_event_cascades_links_and_relations() {
    let (engine, document) = engine_with_document();
    let cause = make_event(document.id, "cause", None);
    let effect = make_event(document.id, "effect", None);
    engine.insert_event(&cause).unwrap();
    engine.insert_event(&effect).unwrap();

    let entity = engine.upsert_entity("Acme", "Acme Corp", "ORG", None).unwrap();
    engine.link_entities_to_event(cause.id, &[entity.id]).unwrap();
    engine
        .insert_relation(&CausalRelation {
            id: Uuid::new_v4(),
            cause_event_id: cause.id,
            effect_event_id: effect.id,
            confidence: 0.8,
            evidence: None,
            created_at: Utc::now(),
        })
        .unwrap();

    assert!(engine.delete_event(cause.id).unwrap());
    assert!(!engine.delete_event(cause.id).unwrap());

    assert!(engine.event_ids_for_entity(entity.id).unwrap().is_empty());
    assert!(engine
        .relations_for_event(effect.id, true, true)
        .unwrap()
        .is_empty());
}

#[test]
fn link_entities_is_idempotent() {
    let (engine, document) = engine_with_document();
    let event = make_event(document.id, "event", None);
    engine.insert_event(&event).unwrap();
    let entity = engine.upsert_entity("Acme", "Acme Corp", "ORG", None).unwrap();

    engine.link_entities_to_event(event.id, &[entity.id]).unwrap();
    engine.link_entities_to_event(event.id, &[entity.id]).unwrap();

    assert_eq!(engine.event_ids_for_entity(entity.id).unwrap(), vec![event.id]);
    assert_eq!(engine.list_links(0, 10).unwrap().len(), 1);
}

#[test]
fn relations_for_event_direction_flags() {
    let (engine, document) = engine_with_document();
    let a = make_event(document.id, "a", None);
    let b = make_event(document.id, "b", None);
    engine.insert_event(&a).unwrap();
    engine.insert_event(&b).unwrap();
    engine
        .insert_relation(&CausalRelation {
            id: Uuid::new_v4(),
            cause_event_id: a.id,
            effect_event_id: b.id,
            confidence: 1.0,
            evidence: Some("a led to b".into()),
            created_at: Utc::now(),
        })
        .unwrap();

    assert_eq!(engine.relations_for_event(a.id, true, false).unwrap().len(), 1);
    assert!(engine.relations_for_event(a.id, false, true).unwrap().is_empty());
    assert!(engine.relations_for_event(a.id, false, false).unwrap().is_empty());
    assert_eq!(engine.relations_for_event(b.id, true, true).unwrap().len(), 1);
}

#[test]
fn dedup_registry_keeps_first_owner() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    assert!(engine.get("abc123").unwrap().is_none());
    engine.register("abc123", first).unwrap();
    engine.register("abc123", second).unwrap();
    assert_eq!(engine.get("abc123").unwrap(), Some(first));
}

#[test]
fn file_backed_engine_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("causeway.db");
    let engine = StorageEngine::open(&path).unwrap();

    let document = make_document("file");
    engine.insert_document(&document).unwrap();
    let event = make_event(document.id, "persisted", Some((2024, 1, 1)));
    engine.insert_event(&event).unwrap();

    let fetched = engine.get_event(event.id).unwrap().unwrap();
    assert_eq!(fetched.description, "persisted");
    assert_eq!(fetched.document_id, document.id);
}
