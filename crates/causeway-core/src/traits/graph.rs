use uuid::Uuid;

use crate::errors::CausewayResult;
use crate::models::{CausesEdge, ChainNode, Direction, EntityNode, EntitySubgraph, EventNode};

/// The causal-graph mirror.
///
/// Every write is an idempotent upsert keyed by a stable id (node id,
/// relation id, or the (event, entity) pair for INVOLVES), so repeated
/// calls overwrite properties without duplicating anything and concurrent
/// writers converge to the same final state. Edge writes require both
/// endpoint nodes to already exist: callers write nodes before edges.
///
/// The mirror is a derived projection — the relational store is the sole
/// source of truth and the graph may be fully rebuilt from it at any time.
pub trait IGraphStore: Send + Sync {
    fn upsert_event_node(&self, node: &EventNode) -> CausewayResult<()>;
    fn upsert_entity_node(&self, node: &EntityNode) -> CausewayResult<()>;

    /// Keyed by `relation_id`. Both endpoints must exist.
    fn upsert_causes_edge(&self, edge: &CausesEdge) -> CausewayResult<()>;

    /// Keyed by the (event, entity) pair. Both endpoints must exist.
    fn upsert_involves_edge(&self, event_id: Uuid, entity_id: Uuid) -> CausewayResult<()>;

    /// Detaches all edges. Returns true if the node existed.
    fn delete_event_node(&self, event_id: Uuid) -> CausewayResult<bool>;
    fn delete_entity_node(&self, entity_id: Uuid) -> CausewayResult<bool>;

    /// Returns true if the edge existed.
    fn delete_causes_edge(&self, relation_id: Uuid) -> CausewayResult<bool>;

    /// Distinct events reachable from the seed within `max_hops` edges
    /// (silently clamped to [1, 10]), annotated with their hop distance and
    /// ordered ascending by hop. The seed itself is not included. An
    /// unknown seed yields an empty chain.
    fn causal_chain(
        &self,
        event_id: Uuid,
        direction: Direction,
        max_hops: usize,
    ) -> CausewayResult<Vec<ChainNode>>;

    /// Events linked to the entity via INVOLVES (chronological, nulls
    /// last, capped at `max_events`) plus every CAUSES edge whose both
    /// endpoints are inside that event set.
    fn entity_subgraph(
        &self,
        entity_id: Uuid,
        max_events: usize,
    ) -> CausewayResult<EntitySubgraph>;

    /// Ordered node sequence along the shortest directed causal path from
    /// `source` to `target`, endpoints included, hop = position. Empty when
    /// no path exists within `max_hops` (clamped to [1, 10]).
    fn shortest_path(
        &self,
        source_event_id: Uuid,
        target_event_id: Uuid,
        max_hops: usize,
    ) -> CausewayResult<Vec<ChainNode>>;

    fn node_count(&self) -> CausewayResult<usize>;
    fn edge_count(&self) -> CausewayResult<usize>;
}
