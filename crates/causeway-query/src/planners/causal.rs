//! Planner for CAUSAL_WHY queries.
//!
//! Seeds come from vector similarity against the question embedding; each
//! seed is then traversed bidirectionally through the causal graph and the
//! merged, deduplicated chain is hydrated with full event rows.

use std::collections::HashSet;

use rayon::prelude::*;
use uuid::Uuid;

use causeway_core::constants::{SEED_LIMIT, SEED_MAX_DISTANCE};
use causeway_core::errors::CausewayResult;
use causeway_core::models::{ChainNode, Direction, Event};

use super::{document_ids, PlanResult, PlannerContext, QueryPlanner};

pub struct CausalPlanner;

impl CausalPlanner {
    /// Find up to SEED_LIMIT anchor events. With an entity filter, the
    /// search is restricted to events involving that entity.
    fn find_seeds(&self, ctx: &PlannerContext<'_>) -> CausewayResult<Vec<Event>> {
        // The embedding is mandatory here — there is no safe default for a
        // similarity-driven seed search, so provider failures propagate.
        let embedding = ctx.embedder.embed(ctx.question)?;

        let pairs = match ctx.entity_id {
            Some(entity_id) => {
                let event_ids = ctx.store.event_ids_for_entity(entity_id)?;
                if event_ids.is_empty() {
                    return Ok(Vec::new());
                }
                ctx.store
                    .vector_search_among(&event_ids, &embedding, SEED_LIMIT)?
            }
            None => ctx
                .store
                .vector_search(&embedding, SEED_LIMIT, SEED_MAX_DISTANCE)?,
        };
        Ok(pairs.into_iter().map(|(event, _dist)| event).collect())
    }

    /// Traverse from every seed and merge the chains, deduplicating by
    /// event id and ordering by hop so the synthesizer sees nearest nodes
    /// first. Traversals are independent reads and run concurrently.
    fn merge_chains(
        &self,
        ctx: &PlannerContext<'_>,
        seeds: &[Event],
    ) -> CausewayResult<Vec<ChainNode>> {
        let chains: Vec<CausewayResult<Vec<ChainNode>>> = seeds
            .par_iter()
            .map(|seed| ctx.graph.causal_chain(seed.id, Direction::Both, ctx.max_hops))
            .collect();

        let mut seen: HashSet<Uuid> = HashSet::new();
        let mut merged = Vec::new();
        for chain in chains {
            for node in chain? {
                if seen.insert(node.event_id) {
                    merged.push(node);
                }
            }
        }
        merged.sort_by_key(|node| node.hop);
        Ok(merged)
    }
}

impl QueryPlanner for CausalPlanner {
    fn plan(&self, ctx: &PlannerContext<'_>) -> CausewayResult<PlanResult> {
        let seeds = self.find_seeds(ctx)?;
        if seeds.is_empty() {
            tracing::info!(question = ctx.question, "causal planner: no seeds");
            return Ok(PlanResult::empty());
        }

        let chain = self.merge_chains(ctx, &seeds)?;

        // Hydrate chain events that the seed search did not already load.
        let seed_ids: HashSet<Uuid> = seeds.iter().map(|event| event.id).collect();
        let extra_ids: Vec<Uuid> = chain
            .iter()
            .map(|node| node.event_id)
            .filter(|id| !seed_ids.contains(id))
            .collect();

        let mut fetched = seeds;
        if !extra_ids.is_empty() {
            fetched.extend(ctx.store.get_events(&extra_ids)?);
        }

        // Deduplicate preserving order.
        let mut seen_events: HashSet<Uuid> = HashSet::new();
        let events: Vec<Event> = fetched
            .into_iter()
            .filter(|event| seen_events.insert(event.id))
            .collect();

        let confidence = (0.70 + 0.10 * chain.len() as f64).min(0.90);

        tracing::info!(
            seeds = seed_ids.len(),
            chain_nodes = chain.len(),
            events = events.len(),
            "causal planner complete"
        );
        Ok(PlanResult {
            document_ids: document_ids(&events),
            events,
            causal_chain: chain,
            confidence,
        })
    }
}
