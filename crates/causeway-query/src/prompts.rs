//! Prompt templates for LLM interactions.

/// Intent classification prompt. `{query}` is replaced with the question.
pub const INTENT_CLASSIFICATION: &str = "\
You are an intent classifier for a temporal-causal database.

Classify the following user query into exactly ONE of these intents:
- CAUSAL_WHY: Questions asking \"why\" something happened, seeking cause-effect chains
- TEMPORAL_RANGE: Questions about what happened during a specific time period
- SIMILARITY: Questions asking for events similar to a described event
- ENTITY_TIMELINE: Questions about the history or timeline of a specific entity

User query: {query}

Respond with ONLY the intent label, nothing else.";

/// Answer synthesis prompt. `{question}`, `{events}`, `{causal_chain}`,
/// and `{sources}` are replaced with formatted sections.
pub const ANSWER_SYNTHESIS: &str = "\
You are a research assistant that synthesizes answers from structured data.

Given the following query results, compose a clear, concise answer to the user's question. Include:
1. A direct answer to the question
2. Supporting evidence from the causal chain (if available)
3. Reference source documents by their source name

User question: {question}

Retrieved events:
{events}

Causal chain (if any):
{causal_chain}

Source documents:
{sources}

Provide a well-structured answer with citations. Be factual — only state what the data supports.";
