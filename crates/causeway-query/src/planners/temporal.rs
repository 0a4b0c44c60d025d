//! Planner for TEMPORAL_RANGE queries.
//!
//! Delegates to the store's filtered listing with the resolved window and
//! optional entity filter. All the hard work happened upstream in the
//! temporal extractor and entity resolver.

use causeway_core::errors::CausewayResult;
use causeway_core::traits::EventFilter;

use super::{document_ids, PlanResult, PlannerContext, QueryPlanner};

pub struct TemporalPlanner;

impl QueryPlanner for TemporalPlanner {
    fn plan(&self, ctx: &PlannerContext<'_>) -> CausewayResult<PlanResult> {
        let filter = EventFilter {
            entity_id: ctx.entity_id,
            from_date: ctx.time_range.map(|range| range.start),
            to_date: ctx.time_range.map(|range| range.end),
            ..EventFilter::default()
        };

        let (events, total) =
            ctx.store
                .list_events(&filter, 0, ctx.config.timeline_limit)?;

        // An unbounded query is less trustworthy than one with a resolved
        // window.
        let confidence = if ctx.time_range.is_some() { 0.85 } else { 0.60 };

        tracing::info!(
            returned = events.len(),
            total,
            bounded = ctx.time_range.is_some(),
            "temporal planner complete"
        );
        Ok(PlanResult {
            document_ids: document_ids(&events),
            events,
            causal_chain: Vec::new(),
            confidence,
        })
    }
}
