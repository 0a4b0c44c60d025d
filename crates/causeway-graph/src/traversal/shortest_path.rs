//! Bounded shortest directed path between two events.

use std::collections::HashMap;

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction as PetDirection;
use uuid::Uuid;

use causeway_core::models::ChainNode;

use crate::graph::IndexedGraph;

use super::clamp_hops;

/// Ordered node sequence along the shortest directed CAUSES path from
/// `source` to `target`, endpoints included, each annotated with its
/// position as the hop. Empty when either endpoint is unknown or no path
/// exists within `max_hops` (clamped to [1, 10]).
pub fn shortest_path(
    graph: &IndexedGraph,
    source: Uuid,
    target: Uuid,
    max_hops: usize,
) -> Vec<ChainNode> {
    let max_hops = clamp_hops(max_hops);

    let (Some(src), Some(dst)) = (graph.node_index(source), graph.node_index(target)) else {
        return Vec::new();
    };
    if src == dst {
        return Vec::new();
    }

    // BFS over outgoing CAUSES edges finds a minimal-hop path; predecessors
    // let us rebuild it.
    let mut predecessor: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut frontier = vec![src];
    let mut found = false;

    'search: for _hop in 0..max_hops {
        let mut next = Vec::new();
        for &current in &frontier {
            for edge in graph.graph.edges_directed(current, PetDirection::Outgoing) {
                if !edge.weight().is_causes() {
                    continue;
                }
                let neighbor = edge.target();
                if neighbor == src || predecessor.contains_key(&neighbor) {
                    continue;
                }
                predecessor.insert(neighbor, current);
                if neighbor == dst {
                    found = true;
                    break 'search;
                }
                next.push(neighbor);
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    if !found {
        return Vec::new();
    }

    let mut indices = vec![dst];
    let mut current = dst;
    while current != src {
        current = predecessor[&current];
        indices.push(current);
    }
    indices.reverse();

    indices
        .iter()
        .enumerate()
        .filter_map(|(hop, &idx)| graph.chain_node(idx, hop))
        .collect()
}
