use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A deduplicated real-world referent.
///
/// Invariant: exactly one row per (lower(canonical_name), entity_type) pair,
/// enforced by the upsert-merge path — there is no second insert path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: Uuid,
    /// Last-seen surface form.
    pub name: String,
    /// Resolved canonical name for cross-document linking.
    pub canonical_name: String,
    /// NER-style type label (PERSON, ORG, GPE, …).
    pub entity_type: String,
    /// Ordered, deduplicated list of observed surface forms.
    pub aliases: Vec<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// How a mention was matched to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveMethod {
    Exact,
    Alias,
    Fuzzy,
}

impl ResolveMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveMethod::Exact => "exact",
            ResolveMethod::Alias => "alias",
            ResolveMethod::Fuzzy => "fuzzy",
        }
    }
}

/// A resolved entity mention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedEntity {
    pub entity_id: Uuid,
    pub canonical_name: String,
    pub entity_type: String,
    /// 0.0 – 1.0; exact = 1.0, alias = 0.95, fuzzy = ratio.
    pub confidence: f64,
    pub method: ResolveMethod,
}
