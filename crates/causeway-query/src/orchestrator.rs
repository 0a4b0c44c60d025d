//! The query pipeline, end to end.
//!
//! classify intent ∥ extract time range ∥ resolve entity filter → dispatch
//! to exactly one planner → synthesize. The three leading stages depend
//! only on the request and run concurrently; everything downstream is
//! sequential because each stage consumes the previous one's output.
//!
//! The orchestrator is stateless across calls and owns no transaction
//! boundary — callers own store sessions and commits.

use causeway_core::config::QueryConfig;
use causeway_core::errors::CausewayResult;
use causeway_core::models::{QueryRequest, QueryResponse};
use causeway_core::traits::{IEmbeddingProvider, IGraphStore, ILlmProvider, IRelationalStore};

use crate::intent::classify_intent;
use crate::planners::{planner_for, PlannerContext};
use crate::resolver::resolve_entity_filter;
use crate::synthesizer;
use crate::temporal::extract_time_range;

/// Long-lived handles the pipeline needs, injected by the caller.
pub struct QueryContext<'a> {
    pub store: &'a dyn IRelationalStore,
    pub graph: &'a dyn IGraphStore,
    pub embedder: &'a dyn IEmbeddingProvider,
    pub llm: &'a dyn ILlmProvider,
    pub config: &'a QueryConfig,
}

/// Execute the full query pipeline for `request`.
pub fn handle_query(
    ctx: &QueryContext<'_>,
    request: &QueryRequest,
) -> CausewayResult<QueryResponse> {
    let question = request.question.as_str();

    // The three pre-planner stages read only the request text; none
    // mutates shared state, so they fan out.
    let (intent_result, (time_range, entity_resolution)) = rayon::join(
        || classify_intent(question, ctx.llm),
        || {
            rayon::join(
                || extract_time_range(question, request.time_range),
                || resolve_entity_filter(ctx.store, request.entity_filter.as_deref()),
            )
        },
    );
    let entity_id = entity_resolution?;

    tracing::info!(
        intent = intent_result.intent.as_str(),
        confidence = intent_result.confidence,
        method = intent_result.method.as_str(),
        "query intent classified"
    );
    tracing::info!(resolved = time_range.is_some(), "query time range");
    tracing::info!(
        filter = ?request.entity_filter,
        entity_id = ?entity_id,
        "query entity resolved"
    );

    let planner_ctx = PlannerContext {
        store: ctx.store,
        graph: ctx.graph,
        embedder: ctx.embedder,
        config: ctx.config,
        question,
        entity_id,
        time_range,
        max_hops: request.max_causal_hops,
    };
    let plan = planner_for(intent_result.intent).plan(&planner_ctx)?;

    tracing::info!(
        intent = intent_result.intent.as_str(),
        events = plan.events.len(),
        chain_nodes = plan.causal_chain.len(),
        planner_confidence = plan.confidence,
        "query plan complete"
    );

    let response = synthesizer::synthesize(
        ctx.store,
        ctx.llm,
        &plan,
        question,
        intent_result.intent,
    )?;

    tracing::info!(
        intent = intent_result.intent.as_str(),
        answer_length = response.answer.len(),
        confidence = response.confidence,
        "query complete"
    );
    Ok(response)
}
