//! Variable-length causal chain traversal with hop bookkeeping.

use std::collections::{HashSet, VecDeque};

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction as PetDirection;
use uuid::Uuid;

use causeway_core::models::{ChainNode, Direction};

use crate::graph::IndexedGraph;

use super::clamp_hops;

/// Distinct events reachable from the seed within `max_hops` CAUSES edges,
/// annotated with hop distance (BFS, so each node gets its shortest
/// distance) and ordered ascending by hop. The seed is not included; an
/// unknown seed yields an empty chain.
pub fn causal_chain(
    graph: &IndexedGraph,
    seed: Uuid,
    direction: Direction,
    max_hops: usize,
) -> Vec<ChainNode> {
    let max_hops = clamp_hops(max_hops);

    let Some(start) = graph.node_index(seed) else {
        return Vec::new();
    };

    let mut visited: HashSet<NodeIndex> = HashSet::new();
    visited.insert(start);

    let mut chain = Vec::new();
    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();
    queue.push_back((start, 0));

    while let Some((current, hop)) = queue.pop_front() {
        if hop >= max_hops {
            continue;
        }
        for neighbor in causes_neighbors(graph, current, direction) {
            if !visited.insert(neighbor) {
                continue;
            }
            if let Some(node) = graph.chain_node(neighbor, hop + 1) {
                chain.push(node);
            }
            queue.push_back((neighbor, hop + 1));
        }
    }

    // BFS already emits in ascending-hop order; keep the sort as the
    // documented contract for callers merging multiple chains.
    chain.sort_by_key(|node| node.hop);
    chain
}

/// Neighbors reachable over CAUSES edges only, honoring the traversal
/// direction. INVOLVES edges never participate in causal traversal.
fn causes_neighbors(
    graph: &IndexedGraph,
    from: NodeIndex,
    direction: Direction,
) -> Vec<NodeIndex> {
    let mut neighbors = Vec::new();
    if matches!(direction, Direction::Downstream | Direction::Both) {
        for edge in graph.graph.edges_directed(from, PetDirection::Outgoing) {
            if edge.weight().is_causes() {
                neighbors.push(edge.target());
            }
        }
    }
    if matches!(direction, Direction::Upstream | Direction::Both) {
        for edge in graph.graph.edges_directed(from, PetDirection::Incoming) {
            if edge.weight().is_causes() {
                neighbors.push(edge.source());
            }
        }
    }
    neighbors
}
