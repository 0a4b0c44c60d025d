//! Entity-centered subgraph: the entity's events plus the CAUSES edges
//! among them.

use std::collections::HashSet;

use petgraph::visit::EdgeRef;
use petgraph::Direction as PetDirection;
use uuid::Uuid;

use causeway_core::models::{EntitySubgraph, SubgraphEdge};

use crate::graph::{EdgeWeight, IndexedGraph};

/// Events linked to the entity via INVOLVES, ordered chronologically
/// (events without a start time last), capped at `max_events`, plus every
/// CAUSES edge whose both endpoints are inside that event set.
pub fn entity_subgraph(
    graph: &IndexedGraph,
    entity_id: Uuid,
    max_events: usize,
) -> EntitySubgraph {
    let Some(entity_idx) = graph.node_index(entity_id) else {
        return EntitySubgraph::default();
    };

    // INVOLVES edges point event → entity, so the entity's events are the
    // sources of its incoming INVOLVES edges.
    let mut event_indices = Vec::new();
    for edge in graph.graph.edges_directed(entity_idx, PetDirection::Incoming) {
        if matches!(edge.weight(), EdgeWeight::Involves) {
            event_indices.push(edge.source());
        }
    }

    let mut events: Vec<_> = event_indices
        .iter()
        .filter_map(|&idx| graph.chain_node(idx, 0))
        .collect();
    events.sort_by(|a, b| match (a.ts_start, b.ts_start) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.event_id.cmp(&b.event_id),
    });
    events.truncate(max_events);

    let event_set: HashSet<Uuid> = events.iter().map(|e| e.event_id).collect();

    let mut edges = Vec::new();
    for event in &events {
        let Some(idx) = graph.node_index(event.event_id) else {
            continue;
        };
        for edge in graph.graph.edges_directed(idx, PetDirection::Outgoing) {
            if let EdgeWeight::Causes(causes) = edge.weight() {
                if event_set.contains(&causes.effect_event_id) {
                    edges.push(SubgraphEdge {
                        cause_id: causes.cause_event_id,
                        effect_id: causes.effect_event_id,
                        relation_id: causes.relation_id,
                        confidence: causes.confidence,
                        evidence: causes.evidence.clone(),
                    });
                }
            }
        }
    }

    EntitySubgraph { events, edges }
}
