//! StorageEngine — owns the ConnectionPool, implements IRelationalStore and
//! IDedupRegistry, runs migrations on startup.

use std::path::Path;

use uuid::Uuid;

use causeway_core::errors::CausewayResult;
use causeway_core::models::{CausalRelation, Document, Entity, Event, EventEntity};
use causeway_core::traits::{EventFilter, IDedupRegistry, IRelationalStore};

use crate::migrations;
use crate::pool::ConnectionPool;

/// The main relational engine. Owns the connection pool and provides the
/// full IRelationalStore + IDedupRegistry surface.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, route reads through the read pool (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> CausewayResult<Self> {
        let pool = ConnectionPool::open(path, crate::pool::ReadPool::default_size())?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing). Routes all reads
    /// through the writer since in-memory read pool connections can't see
    /// the writer's changes.
    pub fn open_in_memory() -> CausewayResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations on the write connection.
    fn initialize(&self) -> CausewayResult<()> {
        self.pool
            .writer
            .with_conn_sync(migrations::run_migrations)
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> CausewayResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> CausewayResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl IRelationalStore for StorageEngine {
    fn insert_document(&self, document: &Document) -> CausewayResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::document_ops::insert_document(conn, document))
    }

    fn get_document(&self, id: Uuid) -> CausewayResult<Option<Document>> {
        self.with_reader(|conn| crate::queries::document_ops::get_document(conn, id))
    }

    fn get_documents(&self, ids: &[Uuid]) -> CausewayResult<Vec<Document>> {
        self.with_reader(|conn| crate::queries::document_ops::get_documents(conn, ids))
    }

    fn insert_event(&self, event: &Event) -> CausewayResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::event_crud::insert_event(conn, event))
    }

    fn get_event(&self, id: Uuid) -> CausewayResult<Option<Event>> {
        self.with_reader(|conn| crate::queries::event_crud::get_event(conn, id))
    }

    fn get_events(&self, ids: &[Uuid]) -> CausewayResult<Vec<Event>> {
        self.with_reader(|conn| crate::queries::event_crud::get_events(conn, ids))
    }

    fn list_events(
        &self,
        filter: &EventFilter,
        offset: usize,
        limit: usize,
    ) -> CausewayResult<(Vec<Event>, usize)> {
        self.with_reader(|conn| crate::queries::event_query::list_events(conn, filter, offset, limit))
    }

    fn vector_search(
        &self,
        embedding: &[f32],
        limit: usize,
        max_distance: f64,
    ) -> CausewayResult<Vec<(Event, f64)>> {
        self.with_reader(|conn| {
            crate::queries::vector_search::search_vector(conn, embedding, limit, max_distance)
        })
    }

    fn vector_search_among(
        &self,
        event_ids: &[Uuid],
        embedding: &[f32],
        limit: usize,
    ) -> CausewayResult<Vec<(Event, f64)>> {
        self.with_reader(|conn| {
            crate::queries::vector_search::search_vector_among(conn, event_ids, embedding, limit)
        })
    }

    fn delete_event(&self, id: Uuid) -> CausewayResult<bool> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::event_crud::delete_event(conn, id))
    }

    fn upsert_entity(
        &self,
        name: &str,
        canonical_name: &str,
        entity_type: &str,
        description: Option<&str>,
    ) -> CausewayResult<Entity> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::entity_ops::upsert_entity(
                conn,
                name,
                canonical_name,
                entity_type,
                description,
            )
        })
    }

    fn get_entity(&self, id: Uuid) -> CausewayResult<Option<Entity>> {
        self.with_reader(|conn| crate::queries::entity_ops::get_entity(conn, id))
    }

    fn get_entity_by_canonical_name(
        &self,
        canonical_name: &str,
        entity_type: &str,
    ) -> CausewayResult<Option<Entity>> {
        self.with_reader(|conn| {
            crate::queries::entity_ops::get_by_canonical_name(conn, canonical_name, entity_type)
        })
    }

    fn list_entities(
        &self,
        name_query: Option<&str>,
        entity_type: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> CausewayResult<(Vec<Entity>, usize)> {
        self.with_reader(|conn| {
            crate::queries::entity_ops::list_entities(conn, name_query, entity_type, offset, limit)
        })
    }

    fn candidates_for_mention(
        &self,
        mention: &str,
        type_hint: Option<&str>,
        limit: usize,
    ) -> CausewayResult<Vec<Entity>> {
        self.with_reader(|conn| {
            crate::queries::entity_ops::candidates_for_mention(conn, mention, type_hint, limit)
        })
    }

    fn entities_for_event(&self, event_id: Uuid) -> CausewayResult<Vec<Entity>> {
        self.with_reader(|conn| crate::queries::entity_ops::entities_for_event(conn, event_id))
    }

    fn delete_entity(&self, id: Uuid) -> CausewayResult<bool> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::entity_ops::delete_entity(conn, id))
    }

    fn link_entities_to_event(
        &self,
        event_id: Uuid,
        entity_ids: &[Uuid],
    ) -> CausewayResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::link_ops::link_entities_to_event(conn, event_id, entity_ids)
        })
    }

    fn event_ids_for_entity(&self, entity_id: Uuid) -> CausewayResult<Vec<Uuid>> {
        self.with_reader(|conn| crate::queries::link_ops::event_ids_for_entity(conn, entity_id))
    }

    fn list_links(&self, offset: usize, limit: usize) -> CausewayResult<Vec<EventEntity>> {
        self.with_reader(|conn| crate::queries::link_ops::list_links(conn, offset, limit))
    }

    fn insert_relation(&self, relation: &CausalRelation) -> CausewayResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::relation_ops::insert_relation(conn, relation))
    }

    fn relations_for_event(
        &self,
        event_id: Uuid,
        as_cause: bool,
        as_effect: bool,
    ) -> CausewayResult<Vec<CausalRelation>> {
        self.with_reader(|conn| {
            crate::queries::relation_ops::relations_for_event(conn, event_id, as_cause, as_effect)
        })
    }

    fn relations_from_events(&self, event_ids: &[Uuid]) -> CausewayResult<Vec<CausalRelation>> {
        self.with_reader(|conn| {
            crate::queries::relation_ops::relations_from_events(conn, event_ids)
        })
    }

    fn list_relations(
        &self,
        offset: usize,
        limit: usize,
    ) -> CausewayResult<Vec<CausalRelation>> {
        self.with_reader(|conn| crate::queries::relation_ops::list_relations(conn, offset, limit))
    }

    fn delete_relation(&self, id: Uuid) -> CausewayResult<bool> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::relation_ops::delete_relation(conn, id))
    }
}

impl IDedupRegistry for StorageEngine {
    fn get(&self, fingerprint: &str) -> CausewayResult<Option<Uuid>> {
        self.with_reader(|conn| crate::queries::dedup_ops::get(conn, fingerprint))
    }

    fn register(&self, fingerprint: &str, document_id: Uuid) -> CausewayResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::dedup_ops::register(conn, fingerprint, document_id))
    }
}
