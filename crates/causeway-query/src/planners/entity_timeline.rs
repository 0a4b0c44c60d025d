//! Planner for ENTITY_TIMELINE queries.
//!
//! Merges the relational chronological event list with the graph's
//! entity-centered subgraph: the event list gives the timeline, the
//! subgraph's CAUSES edges give the synthesizer a causal narrative to walk.

use std::collections::HashSet;

use uuid::Uuid;

use causeway_core::errors::CausewayResult;
use causeway_core::models::{ChainNode, EntitySubgraph};
use causeway_core::traits::EventFilter;

use super::{document_ids, PlanResult, PlannerContext, QueryPlanner};

pub struct EntityTimelinePlanner;

/// Flatten subgraph edges into one chain record per node referenced by any
/// edge, cause before effect, first-seen order. These are a flat listing,
/// not a traversal, so every hop is 0.
fn chain_from_subgraph(subgraph: &EntitySubgraph) -> Vec<ChainNode> {
    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut chain = Vec::new();

    for edge in &subgraph.edges {
        for event_id in [edge.cause_id, edge.effect_id] {
            if !seen.insert(event_id) {
                continue;
            }
            let known = subgraph.events.iter().find(|e| e.event_id == event_id);
            chain.push(ChainNode {
                event_id,
                description: known.map(|e| e.description.clone()).unwrap_or_default(),
                event_type: known.and_then(|e| e.event_type.clone()),
                ts_start: known.and_then(|e| e.ts_start),
                confidence: edge.confidence,
                hop: 0,
            });
        }
    }
    chain
}

impl QueryPlanner for EntityTimelinePlanner {
    fn plan(&self, ctx: &PlannerContext<'_>) -> CausewayResult<PlanResult> {
        // An unresolved entity mention means there is nothing to build a
        // timeline around; neither store is touched.
        let Some(entity_id) = ctx.entity_id else {
            tracing::info!("entity planner: no entity");
            return Ok(PlanResult::empty());
        };

        let filter = EventFilter {
            entity_id: Some(entity_id),
            from_date: ctx.time_range.map(|range| range.start),
            to_date: ctx.time_range.map(|range| range.end),
            ..EventFilter::default()
        };
        let (events, total) =
            ctx.store
                .list_events(&filter, 0, ctx.config.timeline_limit)?;

        let subgraph = ctx
            .graph
            .entity_subgraph(entity_id, ctx.config.subgraph_max_events)?;
        let causal_chain = chain_from_subgraph(&subgraph);

        let confidence = if events.is_empty() { 0.0 } else { 0.88 };

        tracing::info!(
            %entity_id,
            events = events.len(),
            total,
            chain_nodes = causal_chain.len(),
            "entity planner complete"
        );
        Ok(PlanResult {
            document_ids: document_ids(&events),
            events,
            causal_chain,
            confidence,
        })
    }
}
