//! Input shapes for graph-mirror writes and the entity-subgraph result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chain::ChainNode;
use super::event::Event;
use super::relation::CausalRelation;
use super::Entity;

/// Properties of an Event node in the graph mirror, keyed by the event id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventNode {
    pub id: Uuid,
    pub description: String,
    pub event_type: Option<String>,
    pub ts_start: Option<DateTime<Utc>>,
    pub ts_end: Option<DateTime<Utc>>,
    pub confidence: f64,
    pub source_sentence: Option<String>,
    pub document_id: Uuid,
}

impl From<&Event> for EventNode {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            description: event.description.clone(),
            event_type: event.event_type.clone(),
            ts_start: event.ts_start,
            ts_end: event.ts_end,
            confidence: event.confidence,
            source_sentence: event.source_sentence.clone(),
            document_id: event.document_id,
        }
    }
}

/// Properties of an Entity node in the graph mirror, keyed by the entity id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityNode {
    pub id: Uuid,
    pub name: String,
    pub canonical_name: String,
    pub entity_type: String,
}

impl From<&Entity> for EntityNode {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            canonical_name: entity.canonical_name.clone(),
            entity_type: entity.entity_type.clone(),
        }
    }
}

/// A CAUSES edge, keyed by the owning relation id. Repeated writes with the
/// same relation id overwrite properties without duplicating the edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CausesEdge {
    pub relation_id: Uuid,
    pub cause_event_id: Uuid,
    pub effect_event_id: Uuid,
    pub confidence: f64,
    pub evidence: Option<String>,
}

impl From<&CausalRelation> for CausesEdge {
    fn from(relation: &CausalRelation) -> Self {
        Self {
            relation_id: relation.id,
            cause_event_id: relation.cause_event_id,
            effect_event_id: relation.effect_event_id,
            confidence: relation.confidence,
            evidence: relation.evidence.clone(),
        }
    }
}

/// A CAUSES edge inside an entity-centered subgraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubgraphEdge {
    pub cause_id: Uuid,
    pub effect_id: Uuid,
    pub relation_id: Uuid,
    pub confidence: f64,
    pub evidence: Option<String>,
}

/// All events involving an entity plus the CAUSES edges among them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntitySubgraph {
    /// Events linked via INVOLVES, chronological (nulls last), capped.
    /// `hop` is always 0 — these records are a flat listing, not a traversal.
    pub events: Vec<ChainNode>,
    /// CAUSES edges whose both endpoints are within `events`.
    pub edges: Vec<SubgraphEdge>,
}
