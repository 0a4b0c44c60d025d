//! Entity resolver tests over the in-memory relational engine.

use causeway_core::models::ResolveMethod;
use causeway_core::traits::IRelationalStore;
use causeway_query::{resolve_entity, resolve_entity_filter};
use causeway_storage::StorageEngine;

fn seeded_engine() -> StorageEngine {
    let engine = StorageEngine::open_in_memory().unwrap();
    // "Apple Inc." accumulates two aliases through the upsert-merge path.
    engine
        .upsert_entity("Apple Inc.", "Apple Inc.", "ORG", None)
        .unwrap();
    engine.upsert_entity("Apple", "Apple Inc.", "ORG", None).unwrap();
    engine.upsert_entity("AAPL", "Apple Inc.", "ORG", None).unwrap();
    engine
        .upsert_entity("Acme Corporation", "Acme Corporation", "ORG", None)
        .unwrap();
    engine
        .upsert_entity("John Smith", "John Smith", "PERSON", None)
        .unwrap();
    engine
}

#[test]
fn exact_match_wins_with_full_confidence() {
    let engine = seeded_engine();
    let result = resolve_entity(&engine, "apple inc.", None).unwrap().unwrap();
    assert_eq!(result.method, ResolveMethod::Exact);
    assert_eq!(result.confidence, 1.0);
    assert_eq!(result.canonical_name, "Apple Inc.");
}

#[test]
fn exact_tier_beats_fuzzy_even_when_both_would_match() {
    // "Acme Corporation" matches itself exactly and fuzzily; the exact
    // tier must win regardless of candidate ordering.
    let engine = seeded_engine();
    let result = resolve_entity(&engine, "Acme Corporation", None)
        .unwrap()
        .unwrap();
    assert_eq!(result.method, ResolveMethod::Exact);
    assert_eq!(result.confidence, 1.0);
}

#[test]
fn alias_match_at_95() {
    let engine = seeded_engine();
    let result = resolve_entity(&engine, "AAPL", None).unwrap().unwrap();
    // "AAPL" is the last-seen surface form, so it is an exact name hit.
    assert_eq!(result.method, ResolveMethod::Exact);

    // "Apple" survives only in the alias list.
    let result = resolve_entity(&engine, "Apple", None).unwrap().unwrap();
    assert_eq!(result.method, ResolveMethod::Alias);
    assert_eq!(result.confidence, 0.95);
    assert_eq!(result.canonical_name, "Apple Inc.");
}

#[test]
fn fuzzy_match_above_threshold() {
    let engine = seeded_engine();
    // Truncated by one character: still a substring candidate, close
    // enough for the fuzzy tier, but not exact and not an alias.
    let result = resolve_entity(&engine, "Acme Corporatio", None)
        .unwrap()
        .unwrap();
    assert_eq!(result.method, ResolveMethod::Fuzzy);
    assert!(result.confidence >= 0.75);
    assert!(result.confidence < 1.0);
    assert_eq!(result.canonical_name, "Acme Corporation");
}

#[test]
fn weak_similarity_is_no_match() {
    let engine = seeded_engine();
    assert!(resolve_entity(&engine, "Smi", None).unwrap().is_none());
}

#[test]
fn blank_mention_short_circuits() {
    let engine = seeded_engine();
    assert!(resolve_entity(&engine, "   ", None).unwrap().is_none());
    assert!(resolve_entity(&engine, "", None).unwrap().is_none());
}

#[test]
fn type_hint_narrows_candidates() {
    let engine = seeded_engine();
    let result = resolve_entity(&engine, "John Smith", Some("PERSON"))
        .unwrap()
        .unwrap();
    assert_eq!(result.entity_type, "PERSON");
    assert!(resolve_entity(&engine, "John Smith", Some("ORG"))
        .unwrap()
        .is_none());
}

#[test]
fn filter_wrapper_degrades_to_no_filter() {
    let engine = seeded_engine();
    assert!(resolve_entity_filter(&engine, None).unwrap().is_none());
    assert!(resolve_entity_filter(&engine, Some("zzz unknown zzz"))
        .unwrap()
        .is_none());

    let resolved = resolve_entity_filter(&engine, Some("Apple")).unwrap();
    assert!(resolved.is_some());
}
