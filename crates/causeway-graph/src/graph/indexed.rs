//! Id-indexed causal graph.
//!
//! Node kinds: Event, Entity. Edge kinds: CAUSES (event → event, keyed by
//! the owning relation id) and INVOLVES (event → entity, keyed by the
//! endpoint pair). The indexes make every upsert a keyed lookup, which is
//! what makes repeated writes overwrite instead of duplicate.

use std::collections::HashMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction as PetDirection;
use uuid::Uuid;

use causeway_core::errors::{CausewayError, CausewayResult, GraphError};
use causeway_core::models::{CausesEdge, ChainNode, EntityNode, EventNode};

/// Node payload: an Event or Entity mirror, keyed by the row id.
#[derive(Debug, Clone)]
pub enum NodeWeight {
    Event(EventNode),
    Entity(EntityNode),
}

impl NodeWeight {
    pub fn id(&self) -> Uuid {
        match self {
            NodeWeight::Event(node) => node.id,
            NodeWeight::Entity(node) => node.id,
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self, NodeWeight::Event(_))
    }
}

/// Edge payload.
#[derive(Debug, Clone)]
pub enum EdgeWeight {
    Causes(CausesEdge),
    Involves,
}

impl EdgeWeight {
    pub fn is_causes(&self) -> bool {
        matches!(self, EdgeWeight::Causes(_))
    }
}

/// The graph plus the id indexes that give upserts their keys.
#[derive(Default)]
pub struct IndexedGraph {
    pub graph: StableDiGraph<NodeWeight, EdgeWeight>,
    nodes: HashMap<Uuid, NodeIndex>,
    causes: HashMap<Uuid, EdgeIndex>,
    involves: HashMap<(Uuid, Uuid), EdgeIndex>,
}

impl IndexedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node index for an id, if present.
    pub fn node_index(&self, id: Uuid) -> Option<NodeIndex> {
        self.nodes.get(&id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Create or overwrite an Event node, keyed by its id.
    pub fn upsert_event(&mut self, node: EventNode) {
        match self.nodes.get(&node.id) {
            Some(&idx) => self.graph[idx] = NodeWeight::Event(node),
            None => {
                let id = node.id;
                let idx = self.graph.add_node(NodeWeight::Event(node));
                self.nodes.insert(id, idx);
            }
        }
    }

    /// Create or overwrite an Entity node, keyed by its id.
    pub fn upsert_entity(&mut self, node: EntityNode) {
        match self.nodes.get(&node.id) {
            Some(&idx) => self.graph[idx] = NodeWeight::Entity(node),
            None => {
                let id = node.id;
                let idx = self.graph.add_node(NodeWeight::Entity(node));
                self.nodes.insert(id, idx);
            }
        }
    }

    fn require_node(&self, id: Uuid, edge: &'static str) -> CausewayResult<NodeIndex> {
        self.node_index(id).ok_or_else(|| {
            CausewayError::Graph(GraphError::MissingEndpoint {
                edge,
                node_id: id.to_string(),
            })
        })
    }

    /// Create or overwrite a CAUSES edge, keyed by the relation id. Both
    /// endpoint nodes must already exist. Re-keying a relation to a new
    /// endpoint pair replaces the old edge.
    pub fn upsert_causes(&mut self, edge: CausesEdge) -> CausewayResult<()> {
        let cause_idx = self.require_node(edge.cause_event_id, "CAUSES")?;
        let effect_idx = self.require_node(edge.effect_event_id, "CAUSES")?;

        if let Some(&edge_idx) = self.causes.get(&edge.relation_id) {
            let endpoints = self.graph.edge_endpoints(edge_idx);
            if endpoints == Some((cause_idx, effect_idx)) {
                self.graph[edge_idx] = EdgeWeight::Causes(edge);
                return Ok(());
            }
            // Same relation id, new endpoints: drop the stale edge.
            self.graph.remove_edge(edge_idx);
        }

        let relation_id = edge.relation_id;
        let edge_idx = self
            .graph
            .add_edge(cause_idx, effect_idx, EdgeWeight::Causes(edge));
        self.causes.insert(relation_id, edge_idx);
        Ok(())
    }

    /// Create an INVOLVES edge, keyed by the (event, entity) pair. Both
    /// endpoint nodes must already exist. The edge carries no properties,
    /// so a repeated write is a no-op.
    pub fn upsert_involves(&mut self, event_id: Uuid, entity_id: Uuid) -> CausewayResult<()> {
        let event_idx = self.require_node(event_id, "INVOLVES")?;
        let entity_idx = self.require_node(entity_id, "INVOLVES")?;

        if self.involves.contains_key(&(event_id, entity_id)) {
            return Ok(());
        }
        let edge_idx = self
            .graph
            .add_edge(event_idx, entity_idx, EdgeWeight::Involves);
        self.involves.insert((event_id, entity_id), edge_idx);
        Ok(())
    }

    /// Remove a node and detach all its edges. Returns true if it existed.
    pub fn remove_node(&mut self, id: Uuid) -> bool {
        let Some(idx) = self.nodes.remove(&id) else {
            return false;
        };
        // Drop index entries for every incident edge before the node (and
        // its edges) leave the graph.
        let incident: Vec<EdgeIndex> = self
            .graph
            .edges_directed(idx, PetDirection::Outgoing)
            .chain(self.graph.edges_directed(idx, PetDirection::Incoming))
            .map(|e| e.id())
            .collect();
        for edge_idx in incident {
            self.forget_edge(edge_idx);
        }
        self.graph.remove_node(idx);
        true
    }

    /// Remove a CAUSES edge by its relation id. Returns true if it existed.
    pub fn remove_causes(&mut self, relation_id: Uuid) -> bool {
        match self.causes.remove(&relation_id) {
            Some(edge_idx) => {
                self.graph.remove_edge(edge_idx);
                true
            }
            None => false,
        }
    }

    /// Drop the index entry for an edge about to be removed.
    fn forget_edge(&mut self, edge_idx: EdgeIndex) {
        match &self.graph[edge_idx] {
            EdgeWeight::Causes(edge) => {
                self.causes.remove(&edge.relation_id);
            }
            EdgeWeight::Involves => {
                if let Some((src, dst)) = self.graph.edge_endpoints(edge_idx) {
                    let key = (self.graph[src].id(), self.graph[dst].id());
                    self.involves.remove(&key);
                }
            }
        }
    }

    /// Build a chain record for an Event node. Returns None for Entity
    /// nodes.
    pub fn chain_node(&self, idx: NodeIndex, hop: usize) -> Option<ChainNode> {
        match &self.graph[idx] {
            NodeWeight::Event(event) => Some(ChainNode {
                event_id: event.id,
                description: event.description.clone(),
                event_type: event.event_type.clone(),
                ts_start: event.ts_start,
                confidence: event.confidence,
                hop,
            }),
            NodeWeight::Entity(_) => None,
        }
    }
}
