//! Query intent classification.
//!
//! Stage 1: ordered heuristic regex rules — they cover the bulk of
//! unambiguous questions without an LLM round-trip. The first matching
//! rule wins, so rule order is the precedence among overlapping cues.
//!
//! Stage 2: LLM fallback at zero temperature with a tight token budget.
//! An unrecognized label or any provider failure defaults to SIMILARITY
//! at 0.50, the safe strategy for unknown queries.

use std::sync::LazyLock;

use regex::Regex;

use causeway_core::intent::Intent;
use causeway_core::traits::{GenerateOptions, ILlmProvider};

use crate::prompts;

/// How the intent was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyMethod {
    Heuristic,
    Llm,
}

impl ClassifyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifyMethod::Heuristic => "heuristic",
            ClassifyMethod::Llm => "llm",
        }
    }
}

/// Output of the intent classifier.
#[derive(Debug, Clone)]
pub struct IntentResult {
    pub intent: Intent,
    pub confidence: f64,
    pub method: ClassifyMethod,
}

struct Rule {
    intent: Intent,
    confidence: f64,
    pattern: Regex,
}

fn rule(intent: Intent, confidence: f64, pattern: &str) -> Rule {
    Rule {
        intent,
        confidence,
        pattern: Regex::new(pattern).expect("intent rule pattern"),
    }
}

/// Ordered ruleset. Earlier rules take precedence; keep narrow cues (e.g.
/// "because of") ahead of the broad ones that would shadow them.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // Interrogative "why" at the start of the question.
        rule(Intent::CausalWhy, 0.95, r"(?i)^\s*why\b"),
        // Causal cue phrases embedded anywhere.
        rule(
            Intent::CausalWhy,
            0.90,
            r"(?i)\b(cause[sd]?|reason\s+for|led\s+to|result(?:ed)?\s+(?:in|of)|due\s+to|because\s+of|as\s+a\s+(?:result|consequence)\s+of|what\s+caused|explain\s+why)\b",
        ),
        // Explicit range connectives: "between X and Y", "from X to Y".
        rule(
            Intent::TemporalRange,
            0.95,
            r"(?i)\b(between\b.{1,60}\band\b|from\b.{1,60}\bto\b)",
        ),
        // Fiscal quarter references.
        rule(
            Intent::TemporalRange,
            0.90,
            r"(?i)\b(q[1-4]\b|first\s+quarter|second\s+quarter|third\s+quarter|fourth\s+quarter)\b",
        ),
        // Relative temporal expressions.
        rule(
            Intent::TemporalRange,
            0.85,
            r"(?i)\b(last\s+(?:month|year|quarter|week)|in\s+\d{4}|during\s+\w+|(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{4})\b",
        ),
        rule(
            Intent::Similarity,
            0.90,
            r"(?i)\b(similar\s+to|like\s+(?:the|a|an)\b|related\s+to|comparable\s+to|find\s+events?\s+(?:like|similar)|events?\s+resembling|same\s+(?:type|kind)\s+as)\b",
        ),
        rule(
            Intent::EntityTimeline,
            0.92,
            r"(?i)\b(history\s+of|timeline\s+of|everything\s+about|all\s+events?\s+(?:for|about|involving|related\s+to)|what\s+happened\s+to|show\s+(?:me\s+)?(?:all|everything)\s+(?:about|for|on)|events?\s+involving)\b",
        ),
    ]
});

/// Run the heuristic ruleset; None when no rule fires.
fn heuristic_classify(question: &str) -> Option<IntentResult> {
    for rule in RULES.iter() {
        if rule.pattern.is_match(question) {
            tracing::debug!(
                intent = rule.intent.as_str(),
                confidence = rule.confidence,
                "intent heuristic match"
            );
            return Some(IntentResult {
                intent: rule.intent,
                confidence: rule.confidence,
                method: ClassifyMethod::Heuristic,
            });
        }
    }
    None
}

/// LLM fallback. Recovers to SIMILARITY @ 0.50 on an unrecognized label or
/// any provider failure.
fn llm_classify(question: &str, llm: &dyn ILlmProvider) -> IntentResult {
    let prompt = prompts::INTENT_CLASSIFICATION.replace("{query}", question);
    let options = GenerateOptions {
        model: None,
        // Deterministic for classification; a single label word is enough.
        temperature: 0.0,
        max_tokens: 16,
        timeout_secs: None,
    };

    match llm.generate(&prompt, &options) {
        Ok(raw) => {
            if let Some(intent) = Intent::from_label(&raw) {
                tracing::debug!(intent = intent.as_str(), "intent llm classified");
                return IntentResult {
                    intent,
                    confidence: 0.80,
                    method: ClassifyMethod::Llm,
                };
            }
            tracing::warn!(raw = %raw, "intent llm returned unknown label");
        }
        Err(error) => {
            tracing::warn!(%error, "intent llm call failed");
        }
    }

    IntentResult {
        intent: Intent::Similarity,
        confidence: 0.50,
        method: ClassifyMethod::Llm,
    }
}

/// Classify `question` using heuristics, then the LLM fallback.
pub fn classify_intent(question: &str, llm: &dyn ILlmProvider) -> IntentResult {
    if let Some(result) = heuristic_classify(question) {
        return result;
    }
    tracing::debug!(question, "intent falling back to llm");
    llm_classify(question, llm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_core::errors::{CausewayError, CausewayResult, ProviderError};

    struct FixedLlm(Option<String>);

    impl ILlmProvider for FixedLlm {
        fn generate(&self, _prompt: &str, _options: &GenerateOptions) -> CausewayResult<String> {
            match &self.0 {
                Some(label) => Ok(label.clone()),
                None => Err(CausewayError::Provider(ProviderError::Unavailable {
                    provider: "test".into(),
                    reason: "down".into(),
                })),
            }
        }

        fn is_healthy(&self) -> bool {
            self.0.is_some()
        }
    }

    #[test]
    fn leading_why_is_causal() {
        let result = classify_intent("Why did revenue drop in Q3?", &FixedLlm(None));
        assert_eq!(result.intent, Intent::CausalWhy);
        assert_eq!(result.confidence, 0.95);
        assert_eq!(result.method, ClassifyMethod::Heuristic);
    }

    #[test]
    fn causal_cue_beats_quarter_cue() {
        // "because of" appears alongside a quarter reference; the causal
        // rule is earlier and must win.
        let result = classify_intent(
            "Revenue dropped because of supply problems in Q3",
            &FixedLlm(None),
        );
        assert_eq!(result.intent, Intent::CausalWhy);
        assert_eq!(result.confidence, 0.90);
    }

    #[test]
    fn between_range_fires() {
        let result = classify_intent("What happened between July and September?", &FixedLlm(None));
        assert_eq!(result.intent, Intent::TemporalRange);
        assert_eq!(result.confidence, 0.95);
    }

    #[test]
    fn similarity_cue_fires() {
        let result = classify_intent(
            "Find events similar to the supply chain disruption",
            &FixedLlm(None),
        );
        assert_eq!(result.intent, Intent::Similarity);
    }

    #[test]
    fn timeline_cue_fires() {
        let result = classify_intent("Show me everything about Acme Corp", &FixedLlm(None));
        assert_eq!(result.intent, Intent::EntityTimeline);
        assert_eq!(result.confidence, 0.92);
    }

    #[test]
    fn llm_fallback_valid_label() {
        let result = classify_intent(
            "Tell me something interesting",
            &FixedLlm(Some("entity_timeline".into())),
        );
        assert_eq!(result.intent, Intent::EntityTimeline);
        assert_eq!(result.confidence, 0.80);
        assert_eq!(result.method, ClassifyMethod::Llm);
    }

    #[test]
    fn llm_fallback_invalid_label_defaults_to_similarity() {
        let result = classify_intent(
            "Tell me something interesting",
            &FixedLlm(Some("BANANA".into())),
        );
        assert_eq!(result.intent, Intent::Similarity);
        assert_eq!(result.confidence, 0.50);
    }

    #[test]
    fn llm_failure_defaults_to_similarity() {
        let result = classify_intent("Tell me something interesting", &FixedLlm(None));
        assert_eq!(result.intent, Intent::Similarity);
        assert_eq!(result.confidence, 0.50);
        assert_eq!(result.method, ClassifyMethod::Llm);
    }
}
