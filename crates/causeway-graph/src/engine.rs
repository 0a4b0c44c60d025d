//! GraphEngine — the IGraphStore implementation over an IndexedGraph
//! behind a read/write lock.

use std::sync::RwLock;

use uuid::Uuid;

use causeway_core::errors::CausewayResult;
use causeway_core::models::{CausesEdge, ChainNode, Direction, EntityNode, EntitySubgraph, EventNode};
use causeway_core::traits::IGraphStore;

use crate::graph::IndexedGraph;
use crate::traversal;

/// The in-process causal graph mirror.
///
/// All writes are keyed idempotent upserts, so a lock poisoned by a
/// panicking writer holds no broken invariant — the next sync replay
/// converges the state. Reads and writes therefore recover the guard
/// instead of propagating the poison.
#[derive(Default)]
pub struct GraphEngine {
    inner: RwLock<IndexedGraph>,
}

impl GraphEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&IndexedGraph) -> T) -> T {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut IndexedGraph) -> T) -> T {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }
}

impl IGraphStore for GraphEngine {
    fn upsert_event_node(&self, node: &EventNode) -> CausewayResult<()> {
        self.write(|graph| graph.upsert_event(node.clone()));
        tracing::debug!(event_id = %node.id, "graph event upserted");
        Ok(())
    }

    fn upsert_entity_node(&self, node: &EntityNode) -> CausewayResult<()> {
        self.write(|graph| graph.upsert_entity(node.clone()));
        tracing::debug!(entity_id = %node.id, "graph entity upserted");
        Ok(())
    }

    fn upsert_causes_edge(&self, edge: &CausesEdge) -> CausewayResult<()> {
        self.write(|graph| graph.upsert_causes(edge.clone()))?;
        tracing::debug!(
            cause = %edge.cause_event_id,
            effect = %edge.effect_event_id,
            "graph causes edge upserted"
        );
        Ok(())
    }

    fn upsert_involves_edge(&self, event_id: Uuid, entity_id: Uuid) -> CausewayResult<()> {
        self.write(|graph| graph.upsert_involves(event_id, entity_id))?;
        tracing::debug!(%event_id, %entity_id, "graph involves edge upserted");
        Ok(())
    }

    fn delete_event_node(&self, event_id: Uuid) -> CausewayResult<bool> {
        let found = self.write(|graph| graph.remove_node(event_id));
        tracing::debug!(%event_id, found, "graph event deleted");
        Ok(found)
    }

    fn delete_entity_node(&self, entity_id: Uuid) -> CausewayResult<bool> {
        let found = self.write(|graph| graph.remove_node(entity_id));
        tracing::debug!(%entity_id, found, "graph entity deleted");
        Ok(found)
    }

    fn delete_causes_edge(&self, relation_id: Uuid) -> CausewayResult<bool> {
        let found = self.write(|graph| graph.remove_causes(relation_id));
        tracing::debug!(%relation_id, found, "graph causes edge deleted");
        Ok(found)
    }

    fn causal_chain(
        &self,
        event_id: Uuid,
        direction: Direction,
        max_hops: usize,
    ) -> CausewayResult<Vec<ChainNode>> {
        let chain =
            self.read(|graph| traversal::chain::causal_chain(graph, event_id, direction, max_hops));
        tracing::debug!(seed = %event_id, ?direction, nodes = chain.len(), "causal chain fetched");
        Ok(chain)
    }

    fn entity_subgraph(
        &self,
        entity_id: Uuid,
        max_events: usize,
    ) -> CausewayResult<EntitySubgraph> {
        let subgraph =
            self.read(|graph| traversal::subgraph::entity_subgraph(graph, entity_id, max_events));
        tracing::debug!(
            %entity_id,
            events = subgraph.events.len(),
            edges = subgraph.edges.len(),
            "entity subgraph fetched"
        );
        Ok(subgraph)
    }

    fn shortest_path(
        &self,
        source_event_id: Uuid,
        target_event_id: Uuid,
        max_hops: usize,
    ) -> CausewayResult<Vec<ChainNode>> {
        let path = self.read(|graph| {
            traversal::shortest_path::shortest_path(graph, source_event_id, target_event_id, max_hops)
        });
        tracing::debug!(
            source = %source_event_id,
            target = %target_event_id,
            hops = path.len().saturating_sub(1),
            "shortest path fetched"
        );
        Ok(path)
    }

    fn node_count(&self) -> CausewayResult<usize> {
        Ok(self.read(|graph| graph.node_count()))
    }

    fn edge_count(&self) -> CausewayResult<usize> {
        Ok(self.read(|graph| graph.edge_count()))
    }
}
