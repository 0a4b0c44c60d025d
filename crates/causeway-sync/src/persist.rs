//! Persist NLP extraction output into the relational store.
//!
//! The extraction pipeline is an external collaborator; its output records
//! are persisted opaquely here, then mirrored by `sync_document`. Entities
//! go through the single upsert-merge path, so re-processing a document
//! never creates duplicate canonical rows.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use causeway_core::errors::CausewayResult;
use causeway_core::models::{CausalRelation, Entity, Event, ExtractionOutput};
use causeway_core::traits::IRelationalStore;

/// Per-type row counts from one persistence run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistReport {
    pub events: usize,
    pub entities: usize,
    pub links: usize,
    pub relations: usize,
}

/// Case-folded key for intra-batch entity dedup.
fn entity_key(canonical_name: &str, entity_type: &str) -> (String, String) {
    (canonical_name.to_lowercase(), entity_type.to_string())
}

/// Match a relation clause to an event description: exact case-insensitive
/// match first, then containment either way.
fn match_event<'a>(clause: &str, events: &'a [Event]) -> Option<&'a Event> {
    let clause = clause.trim().to_lowercase();
    if clause.is_empty() {
        return None;
    }
    events
        .iter()
        .find(|event| event.description.to_lowercase() == clause)
        .or_else(|| {
            events.iter().find(|event| {
                let description = event.description.to_lowercase();
                description.contains(&clause) || clause.contains(&description)
            })
        })
}

/// Persist one document's extraction output: entities (upsert-merge),
/// events, event↔entity links, and causal relations.
///
/// `embeddings`, when given, is aligned by index with `output.events`;
/// the caller produces it with `IEmbeddingProvider::embed_batch` over the
/// event descriptions.
pub fn persist_extraction(
    store: &dyn IRelationalStore,
    document_id: Uuid,
    output: &ExtractionOutput,
    embeddings: Option<&[Vec<f32>]>,
) -> CausewayResult<PersistReport> {
    let mut report = PersistReport::default();

    // Entities first: events link to them. The intra-batch cache collapses
    // repeated canonical entities to one store round-trip.
    let mut cache: HashMap<(String, String), Entity> = HashMap::new();
    // Surface form (lowercased) → entity id, for subject linking.
    let mut surface_index: HashMap<String, Uuid> = HashMap::new();

    for linked in &output.entities {
        let key = entity_key(&linked.canonical_name, &linked.entity_type);
        let entity = match cache.get(&key) {
            Some(entity) => entity.clone(),
            None => {
                let entity = store.upsert_entity(
                    &linked.name,
                    &linked.canonical_name,
                    &linked.entity_type,
                    linked.description.as_deref(),
                )?;
                report.entities += 1;
                cache.insert(key, entity.clone());
                entity
            }
        };
        surface_index.insert(linked.name.to_lowercase(), entity.id);
        surface_index.insert(linked.canonical_name.to_lowercase(), entity.id);
    }

    // Events, with their embeddings when provided.
    let now = Utc::now();
    let mut events = Vec::with_capacity(output.events.len());
    for (index, extracted) in output.events.iter().enumerate() {
        let event = Event {
            id: Uuid::new_v4(),
            description: extracted.description.clone(),
            event_type: extracted.event_type.clone(),
            ts_start: extracted.ts_start,
            ts_end: extracted.ts_end,
            confidence: extracted.confidence,
            source_sentence: extracted.source_sentence.clone(),
            document_id,
            embedding: embeddings.and_then(|all| all.get(index).cloned()),
            created_at: now,
        };
        store.insert_event(&event)?;
        events.push(event);
    }
    report.events = events.len();

    // Links: match each event's subjects against the observed surface
    // forms. Unmatched subjects are extraction noise, not errors.
    for (extracted, event) in output.events.iter().zip(&events) {
        let entity_ids: Vec<Uuid> = extracted
            .subjects
            .iter()
            .filter_map(|subject| surface_index.get(&subject.to_lowercase()).copied())
            .collect();
        if !entity_ids.is_empty() {
            store.link_entities_to_event(event.id, &entity_ids)?;
            report.links += entity_ids.len();
        }
    }

    // Relations: clauses reference events by description.
    for extracted in &output.relations {
        let cause = match_event(&extracted.cause, &events);
        let effect = match_event(&extracted.effect, &events);
        let (Some(cause), Some(effect)) = (cause, effect) else {
            tracing::debug!(
                cause = %extracted.cause,
                effect = %extracted.effect,
                "relation clause did not match an event"
            );
            continue;
        };
        if cause.id == effect.id {
            continue;
        }
        store.insert_relation(&CausalRelation {
            id: Uuid::new_v4(),
            cause_event_id: cause.id,
            effect_event_id: effect.id,
            confidence: extracted.confidence,
            evidence: extracted.evidence.clone(),
            created_at: now,
        })?;
        report.relations += 1;
    }

    tracing::info!(
        %document_id,
        events = report.events,
        entities = report.entities,
        links = report.links,
        relations = report.relations,
        "extraction persisted"
    );
    Ok(report)
}
