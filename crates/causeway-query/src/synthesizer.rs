//! Answer synthesis with structured citations.
//!
//! Converts a PlanResult into the final QueryResponse: resolves source
//! documents, formats the retrieved data into the synthesis prompt, and
//! calls the LLM. Any provider failure degrades to a deterministic
//! template answer — causal chain first, then raw events, then a
//! no-results message — so the caller always gets a usable response.

use causeway_core::errors::CausewayResult;
use causeway_core::intent::Intent;
use causeway_core::models::{CausalChainLink, EventBrief, QueryResponse, SourceReference};
use causeway_core::traits::{GenerateOptions, ILlmProvider, IRelationalStore};

use crate::planners::PlanResult;
use crate::prompts;

fn format_events(briefs: &[EventBrief]) -> String {
    if briefs.is_empty() {
        return "No events retrieved.".to_string();
    }
    briefs
        .iter()
        .map(|event| {
            let ts = event
                .ts_start
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "unknown date".to_string());
            format!(
                "- [{ts}] {} (confidence: {:.2})",
                event.description, event.confidence
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_chain(links: &[CausalChainLink]) -> String {
    if links.is_empty() {
        return "No causal chain available.".to_string();
    }
    links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let ts = link
                .ts_start
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "unknown date".to_string());
            format!(
                "{}. [{ts}] {} (confidence: {:.2})",
                i + 1,
                link.description,
                link.confidence
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_sources(sources: &[SourceReference]) -> String {
    if sources.is_empty() {
        return "No source documents.".to_string();
    }
    sources
        .iter()
        .map(|src| format!("- {} (id: {})", src.source, src.id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deterministic answer used when the LLM is unavailable. The causal
/// chain narrative takes priority, then the raw event list, then a
/// no-results message.
fn fallback_answer(
    question: &str,
    briefs: &[EventBrief],
    links: &[CausalChainLink],
) -> String {
    let mut parts = vec![format!("Query: {question}\n")];

    if !links.is_empty() {
        parts.push("Causal chain identified:".to_string());
        for (i, link) in links.iter().enumerate() {
            let ts = link
                .ts_start
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "unknown date".to_string());
            parts.push(format!("  {}. {} ({ts})", i + 1, link.description));
        }
    } else if !briefs.is_empty() {
        parts.push("Relevant events found:".to_string());
        for event in briefs.iter().take(5) {
            let ts = event
                .ts_start
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "unknown date".to_string());
            parts.push(format!("  - {} ({ts})", event.description));
        }
    } else {
        parts.push("No relevant events found for this query.".to_string());
    }

    parts.join("\n")
}

/// Resolve the plan's document ids into source citations. Filenames are
/// folded into the metadata object.
fn fetch_sources(
    store: &dyn IRelationalStore,
    plan: &PlanResult,
) -> CausewayResult<Vec<SourceReference>> {
    let ids: Vec<_> = plan.document_ids.iter().copied().collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let documents = store.get_documents(&ids)?;

    let mut sources = Vec::with_capacity(documents.len());
    for doc in documents {
        let mut metadata = doc.metadata.clone();
        if let Some(filename) = &doc.filename {
            let mut object = match metadata {
                Some(serde_json::Value::Object(map)) => map,
                _ => serde_json::Map::new(),
            };
            object.insert(
                "filename".to_string(),
                serde_json::Value::String(filename.clone()),
            );
            metadata = Some(serde_json::Value::Object(object));
        }
        sources.push(SourceReference {
            id: doc.id,
            source: doc.source,
            metadata,
        });
    }
    Ok(sources)
}

/// Synthesize a cited natural-language answer from a PlanResult.
pub fn synthesize(
    store: &dyn IRelationalStore,
    llm: &dyn ILlmProvider,
    plan: &PlanResult,
    question: &str,
    intent: Intent,
) -> CausewayResult<QueryResponse> {
    let briefs: Vec<EventBrief> = plan.events.iter().map(EventBrief::from).collect();
    let links: Vec<CausalChainLink> =
        plan.causal_chain.iter().map(CausalChainLink::from).collect();
    let sources = fetch_sources(store, plan)?;

    let prompt = prompts::ANSWER_SYNTHESIS
        .replace("{question}", question)
        .replace("{events}", &format_events(&briefs))
        .replace("{causal_chain}", &format_chain(&links))
        .replace("{sources}", &format_sources(&sources));

    let options = GenerateOptions {
        model: None,
        temperature: 0.3,
        max_tokens: 1024,
        timeout_secs: None,
    };
    let answer = match llm.generate(&prompt, &options) {
        Ok(text) => {
            let text = text.trim().to_string();
            tracing::info!(length = text.len(), "synthesizer: llm answer");
            text
        }
        Err(error) => {
            tracing::warn!(%error, "synthesizer: llm failed, using template");
            fallback_answer(question, &briefs, &links)
        }
    };

    Ok(QueryResponse {
        answer,
        confidence: crate::round4(plan.confidence),
        intent: intent.as_str().to_string(),
        causal_chain: links,
        events: briefs,
        sources,
    })
}
