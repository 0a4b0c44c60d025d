//! Planner for SIMILARITY queries.
//!
//! Vector search over the events table, over-fetching 3× when post-filters
//! are present, then filtering in memory by entity linkage and time window
//! before trimming to the requested limit. Confidence is the mean of
//! (1 − cosine distance) over the returned rows.

use std::collections::HashSet;

use uuid::Uuid;

use causeway_core::constants::SIMILARITY_MAX_DISTANCE;
use causeway_core::errors::CausewayResult;
use causeway_core::models::Event;

use super::{document_ids, PlanResult, PlannerContext, QueryPlanner};

pub struct SimilarityPlanner;

impl QueryPlanner for SimilarityPlanner {
    fn plan(&self, ctx: &PlannerContext<'_>) -> CausewayResult<PlanResult> {
        // Mandatory search — provider failures propagate.
        let embedding = ctx.embedder.embed(ctx.question)?;

        let limit = ctx.config.similarity_limit;
        let has_post_filters = ctx.entity_id.is_some() || ctx.time_range.is_some();
        let fetch_limit = if has_post_filters { limit * 3 } else { limit };

        let mut pairs = ctx
            .store
            .vector_search(&embedding, fetch_limit, SIMILARITY_MAX_DISTANCE)?;

        if let Some(entity_id) = ctx.entity_id {
            let linked: HashSet<Uuid> =
                ctx.store.event_ids_for_entity(entity_id)?.into_iter().collect();
            pairs.retain(|(event, _)| linked.contains(&event.id));
        }

        if let Some(range) = ctx.time_range {
            // Events without a start time cannot satisfy a time filter.
            pairs.retain(|(event, _)| {
                event
                    .ts_start
                    .is_some_and(|ts| range.start <= ts && ts <= range.end)
            });
        }

        pairs.truncate(limit);

        let events: Vec<Event> = pairs.iter().map(|(event, _)| event.clone()).collect();
        let confidence = if pairs.is_empty() {
            0.0
        } else {
            let sum: f64 = pairs.iter().map(|(_, dist)| 1.0 - dist).sum();
            crate::round4(sum / pairs.len() as f64)
        };

        tracing::info!(
            returned = events.len(),
            avg_confidence = confidence,
            "similarity planner complete"
        );
        Ok(PlanResult {
            document_ids: document_ids(&events),
            events,
            causal_chain: Vec::new(),
            confidence,
        })
    }
}
