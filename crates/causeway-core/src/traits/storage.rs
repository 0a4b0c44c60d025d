use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::CausewayResult;
use crate::models::{CausalRelation, Document, Entity, Event, EventEntity};

/// Optional filters for event listing, combined with AND logic.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub document_id: Option<Uuid>,
    pub entity_id: Option<Uuid>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    pub event_type: Option<String>,
}

/// The relational store of record.
///
/// The query path treats this as read-only; writes happen only on the
/// ingestion/sync path. All reads surface absence as `None`/empty, never as
/// an error.
pub trait IRelationalStore: Send + Sync {
    // --- Documents ---
    fn insert_document(&self, document: &Document) -> CausewayResult<()>;
    fn get_document(&self, id: Uuid) -> CausewayResult<Option<Document>>;
    fn get_documents(&self, ids: &[Uuid]) -> CausewayResult<Vec<Document>>;

    // --- Events ---
    fn insert_event(&self, event: &Event) -> CausewayResult<()>;
    fn get_event(&self, id: Uuid) -> CausewayResult<Option<Event>>;
    fn get_events(&self, ids: &[Uuid]) -> CausewayResult<Vec<Event>>;

    /// Paginated fetch ordered by ts_start ascending (NULLs last), then
    /// created_at. Returns (page, total_count) where the count applies the
    /// same filters without pagination.
    fn list_events(
        &self,
        filter: &EventFilter,
        offset: usize,
        limit: usize,
    ) -> CausewayResult<(Vec<Event>, usize)>;

    /// Events ranked by cosine distance to the query embedding,
    /// nearest-first, excluding rows beyond `max_distance`.
    fn vector_search(
        &self,
        embedding: &[f32],
        limit: usize,
        max_distance: f64,
    ) -> CausewayResult<Vec<(Event, f64)>>;

    /// Vector search restricted to the given event ids (entity-anchored
    /// seed search). No distance ceiling — the candidate set is already
    /// narrow.
    fn vector_search_among(
        &self,
        event_ids: &[Uuid],
        embedding: &[f32],
        limit: usize,
    ) -> CausewayResult<Vec<(Event, f64)>>;

    /// Returns true if a row was deleted. Join-table and causal-relation
    /// rows cascade.
    fn delete_event(&self, id: Uuid) -> CausewayResult<bool>;

    // --- Entities ---

    /// The single write path for entities: returns the canonical row for
    /// (canonical_name, entity_type), creating it if absent, and merges
    /// `name` into its alias list.
    fn upsert_entity(
        &self,
        name: &str,
        canonical_name: &str,
        entity_type: &str,
        description: Option<&str>,
    ) -> CausewayResult<Entity>;

    fn get_entity(&self, id: Uuid) -> CausewayResult<Option<Entity>>;
    fn get_entity_by_canonical_name(
        &self,
        canonical_name: &str,
        entity_type: &str,
    ) -> CausewayResult<Option<Entity>>;

    /// Paginated listing with an optional case-insensitive substring match
    /// on name/canonical_name and an optional type filter, ordered by
    /// canonical_name.
    fn list_entities(
        &self,
        name_query: Option<&str>,
        entity_type: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> CausewayResult<(Vec<Entity>, usize)>;

    /// Bounded candidate set for mention resolution: substring match on
    /// either name column, optionally type-filtered, ordered by
    /// canonical_name, capped at `limit`.
    fn candidates_for_mention(
        &self,
        mention: &str,
        type_hint: Option<&str>,
        limit: usize,
    ) -> CausewayResult<Vec<Entity>>;

    fn entities_for_event(&self, event_id: Uuid) -> CausewayResult<Vec<Entity>>;
    fn delete_entity(&self, id: Uuid) -> CausewayResult<bool>;

    // --- Event ↔ entity links ---

    /// Create join rows for the given entity ids, skipping ones already
    /// linked (idempotent).
    fn link_entities_to_event(
        &self,
        event_id: Uuid,
        entity_ids: &[Uuid],
    ) -> CausewayResult<()>;

    fn event_ids_for_entity(&self, entity_id: Uuid) -> CausewayResult<Vec<Uuid>>;

    /// Paginated join-row listing ordered by (event_id, entity_id), for the
    /// full resync.
    fn list_links(&self, offset: usize, limit: usize) -> CausewayResult<Vec<EventEntity>>;

    // --- Causal relations ---
    fn insert_relation(&self, relation: &CausalRelation) -> CausewayResult<()>;

    fn relations_for_event(
        &self,
        event_id: Uuid,
        as_cause: bool,
        as_effect: bool,
    ) -> CausewayResult<Vec<CausalRelation>>;

    /// Relations whose cause event belongs to the given set (per-document
    /// sync).
    fn relations_from_events(&self, event_ids: &[Uuid]) -> CausewayResult<Vec<CausalRelation>>;

    /// Paginated listing ordered by created_at, for the full resync.
    fn list_relations(&self, offset: usize, limit: usize)
        -> CausewayResult<Vec<CausalRelation>>;

    fn delete_relation(&self, id: Uuid) -> CausewayResult<bool>;
}
