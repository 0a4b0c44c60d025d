//! Integration tests for the causal graph engine.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use causeway_core::errors::{CausewayError, GraphError};
use causeway_core::models::{CausesEdge, Direction, EntityNode, EventNode};
use causeway_core::traits::IGraphStore;
use causeway_graph::GraphEngine;

fn event_node(id: Uuid, description: &str) -> EventNode {
    EventNode {
        id,
        description: description.to_string(),
        event_type: None,
        ts_start: None,
        ts_end: None,
        confidence: 0.9,
        source_sentence: None,
        document_id: Uuid::new_v4(),
    }
}

fn entity_node(id: Uuid, name: &str) -> EntityNode {
    EntityNode {
        id,
        name: name.to_string(),
        canonical_name: name.to_string(),
        entity_type: "ORG".to_string(),
    }
}

fn causes(relation_id: Uuid, cause: Uuid, effect: Uuid) -> CausesEdge {
    CausesEdge {
        relation_id,
        cause_event_id: cause,
        effect_event_id: effect,
        confidence: 0.8,
        evidence: None,
    }
}

/// Build E1 → E2 → E3 and return the engine plus ids.
fn linear_chain() -> (GraphEngine, [Uuid; 3]) {
    let engine = GraphEngine::new();
    let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    for (i, id) in ids.iter().enumerate() {
        engine
            .upsert_event_node(&event_node(*id, &format!("E{}", i + 1)))
            .unwrap();
    }
    engine
        .upsert_causes_edge(&causes(Uuid::new_v4(), ids[0], ids[1]))
        .unwrap();
    engine
        .upsert_causes_edge(&causes(Uuid::new_v4(), ids[1], ids[2]))
        .unwrap();
    (engine, ids)
}

#[test]
fn node_upsert_is_idempotent() {
    let engine = GraphEngine::new();
    let id = Uuid::new_v4();

    engine.upsert_event_node(&event_node(id, "first")).unwrap();
    engine.upsert_event_node(&event_node(id, "second")).unwrap();

    assert_eq!(engine.node_count().unwrap(), 1);
    // Properties were overwritten, not duplicated.
    let chain_seed = Uuid::new_v4();
    engine.upsert_event_node(&event_node(chain_seed, "seed")).unwrap();
    engine
        .upsert_causes_edge(&causes(Uuid::new_v4(), chain_seed, id))
        .unwrap();
    let chain = engine
        .causal_chain(chain_seed, Direction::Downstream, 3)
        .unwrap();
    assert_eq!(chain[0].description, "second");
}

#[test]
fn edge_upsert_keyed_by_relation_id() {
    let (engine, ids) = linear_chain();
    let relation_id = Uuid::new_v4();

    let mut edge = causes(relation_id, ids[0], ids[2]);
    edge.confidence = 0.5;
    engine.upsert_causes_edge(&edge).unwrap();
    assert_eq!(engine.edge_count().unwrap(), 3);

    // Same key again: overwrite, no duplicate.
    edge.confidence = 0.7;
    engine.upsert_causes_edge(&edge).unwrap();
    assert_eq!(engine.edge_count().unwrap(), 3);
}

#[test]
fn edge_write_requires_both_endpoints() {
    let engine = GraphEngine::new();
    let known = Uuid::new_v4();
    engine.upsert_event_node(&event_node(known, "known")).unwrap();

    let result = engine.upsert_causes_edge(&causes(Uuid::new_v4(), known, Uuid::new_v4()));
    assert!(matches!(
        result,
        Err(CausewayError::Graph(GraphError::MissingEndpoint { .. }))
    ));
}

#[test]
fn causal_chain_both_directions_ascending_hops() {
    let (engine, ids) = linear_chain();

    let chain = engine.causal_chain(ids[0], Direction::Both, 3).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].event_id, ids[1]);
    assert_eq!(chain[0].hop, 1);
    assert_eq!(chain[1].event_id, ids[2]);
    assert_eq!(chain[1].hop, 2);
}

#[test]
fn causal_chain_direction_is_honored() {
    let (engine, ids) = linear_chain();

    let downstream = engine
        .causal_chain(ids[1], Direction::Downstream, 5)
        .unwrap();
    assert_eq!(downstream.len(), 1);
    assert_eq!(downstream[0].event_id, ids[2]);

    let upstream = engine.causal_chain(ids[1], Direction::Upstream, 5).unwrap();
    assert_eq!(upstream.len(), 1);
    assert_eq!(upstream[0].event_id, ids[0]);
}

#[test]
fn hop_bounds_are_clamped_not_rejected() {
    let (engine, ids) = linear_chain();

    // max_hops = 0 behaves as 1.
    let zero = engine.causal_chain(ids[0], Direction::Both, 0).unwrap();
    assert_eq!(zero.len(), 1);
    assert_eq!(zero[0].event_id, ids[1]);

    // max_hops = 999 behaves as 10.
    let huge = engine.causal_chain(ids[0], Direction::Both, 999).unwrap();
    assert_eq!(huge.len(), 2);
    assert!(huge.iter().all(|node| node.hop <= 10));
}

#[test]
fn chain_from_unknown_seed_is_empty() {
    let (engine, _ids) = linear_chain();
    assert!(engine
        .causal_chain(Uuid::new_v4(), Direction::Both, 3)
        .unwrap()
        .is_empty());
}

#[test]
fn diamond_reports_shortest_hop_without_duplicates() {
    // A → B → D and A → C → D: D must appear once, at hop 2.
    let engine = GraphEngine::new();
    let [a, b, c, d] = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    for (id, name) in [(a, "A"), (b, "B"), (c, "C"), (d, "D")] {
        engine.upsert_event_node(&event_node(id, name)).unwrap();
    }
    for (cause, effect) in [(a, b), (a, c), (b, d), (c, d)] {
        engine
            .upsert_causes_edge(&causes(Uuid::new_v4(), cause, effect))
            .unwrap();
    }

    let chain = engine.causal_chain(a, Direction::Downstream, 5).unwrap();
    assert_eq!(chain.len(), 3);
    let d_nodes: Vec<_> = chain.iter().filter(|n| n.event_id == d).collect();
    assert_eq!(d_nodes.len(), 1);
    assert_eq!(d_nodes[0].hop, 2);
}

#[test]
fn delete_node_detaches_edges() {
    let (engine, ids) = linear_chain();

    assert!(engine.delete_event_node(ids[1]).unwrap());
    assert!(!engine.delete_event_node(ids[1]).unwrap());

    assert_eq!(engine.node_count().unwrap(), 2);
    assert_eq!(engine.edge_count().unwrap(), 0);
    assert!(engine.causal_chain(ids[0], Direction::Both, 5).unwrap().is_empty());
}

#[test]
fn delete_causes_edge_by_relation_id() {
    let (engine, ids) = linear_chain();
    let relation_id = Uuid::new_v4();
    engine
        .upsert_causes_edge(&causes(relation_id, ids[2], ids[0]))
        .unwrap();

    assert!(engine.delete_causes_edge(relation_id).unwrap());
    assert!(!engine.delete_causes_edge(relation_id).unwrap());
    assert_eq!(engine.edge_count().unwrap(), 2);
}

#[test]
fn shortest_path_includes_endpoints_with_positional_hops() {
    let (engine, ids) = linear_chain();

    let path = engine.shortest_path(ids[0], ids[2], 5).unwrap();
    let hops: Vec<_> = path.iter().map(|node| node.hop).collect();
    let nodes: Vec<_> = path.iter().map(|node| node.event_id).collect();
    assert_eq!(nodes, vec![ids[0], ids[1], ids[2]]);
    assert_eq!(hops, vec![0, 1, 2]);
}

#[test]
fn shortest_path_respects_direction_and_bound() {
    let (engine, ids) = linear_chain();

    // The causal direction is E1 → E3; the reverse is unreachable.
    assert!(engine.shortest_path(ids[2], ids[0], 5).unwrap().is_empty());

    // Two hops needed, bound of one (after clamping) finds nothing.
    assert!(engine.shortest_path(ids[0], ids[2], 1).unwrap().is_empty());
    assert!(engine.shortest_path(ids[0], ids[2], 0).unwrap().is_empty());
}

#[test]
fn entity_subgraph_is_chronological_with_inner_edges() {
    let engine = GraphEngine::new();
    let entity_id = Uuid::new_v4();
    engine.upsert_entity_node(&entity_node(entity_id, "Acme")).unwrap();

    let [early, late, undated, outside] =
        [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    let mut early_node = event_node(early, "early");
    early_node.ts_start = Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    let mut late_node = event_node(late, "late");
    late_node.ts_start = Some(Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap());
    engine.upsert_event_node(&early_node).unwrap();
    engine.upsert_event_node(&late_node).unwrap();
    engine.upsert_event_node(&event_node(undated, "undated")).unwrap();
    engine.upsert_event_node(&event_node(outside, "outside")).unwrap();

    for event in [early, late, undated] {
        engine.upsert_involves_edge(event, entity_id).unwrap();
    }
    // Inside the event set.
    engine
        .upsert_causes_edge(&causes(Uuid::new_v4(), early, late))
        .unwrap();
    // Crosses the boundary: must not be reported.
    engine
        .upsert_causes_edge(&causes(Uuid::new_v4(), late, outside))
        .unwrap();

    let subgraph = engine.entity_subgraph(entity_id, 50).unwrap();
    let order: Vec<_> = subgraph
        .events
        .iter()
        .map(|event| event.description.as_str())
        .collect();
    assert_eq!(order, vec!["early", "late", "undated"]);
    assert_eq!(subgraph.edges.len(), 1);
    assert_eq!(subgraph.edges[0].cause_id, early);
    assert_eq!(subgraph.edges[0].effect_id, late);

    // The cap trims the chronological head.
    let capped = engine.entity_subgraph(entity_id, 1).unwrap();
    assert_eq!(capped.events.len(), 1);
    assert_eq!(capped.events[0].description, "early");
    assert!(capped.edges.is_empty());
}

#[test]
fn involves_upsert_is_idempotent() {
    let engine = GraphEngine::new();
    let entity_id = Uuid::new_v4();
    let event_id = Uuid::new_v4();
    engine.upsert_entity_node(&entity_node(entity_id, "Acme")).unwrap();
    engine.upsert_event_node(&event_node(event_id, "E")).unwrap();

    engine.upsert_involves_edge(event_id, entity_id).unwrap();
    engine.upsert_involves_edge(event_id, entity_id).unwrap();
    assert_eq!(engine.edge_count().unwrap(), 1);
}
