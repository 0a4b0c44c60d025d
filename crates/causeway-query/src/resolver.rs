//! Resolve a free-text entity mention to a canonical entity id.
//!
//! Three tiers, short-circuiting on the first match:
//! 1. Exact  — case-insensitive equality on canonical_name or name (1.0).
//! 2. Alias  — the mention appears in the entity's alias list (0.95).
//! 3. Fuzzy  — best normalized-Levenshtein ratio against both names,
//!             accepted at ≥ 0.75 (confidence = ratio).
//!
//! Tier priority is absolute: a candidate that matches exactly always wins
//! over any fuzzy score, regardless of candidate ordering.

use uuid::Uuid;

use causeway_core::constants::{CANDIDATE_LIMIT, FUZZY_THRESHOLD};
use causeway_core::errors::CausewayResult;
use causeway_core::models::{Entity, ResolveMethod, ResolvedEntity};
use causeway_core::traits::IRelationalStore;

fn norm(text: &str) -> String {
    text.trim().to_lowercase()
}

fn fuzzy_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&norm(a), &norm(b))
}

fn check_aliases(entity: &Entity, norm_mention: &str) -> bool {
    entity.aliases.iter().any(|alias| norm(alias) == norm_mention)
}

fn resolved(entity: &Entity, confidence: f64, method: ResolveMethod) -> ResolvedEntity {
    ResolvedEntity {
        entity_id: entity.id,
        canonical_name: entity.canonical_name.clone(),
        entity_type: entity.entity_type.clone(),
        confidence,
        method,
    }
}

/// Resolve `mention` against the entity store. Returns `None` when no tier
/// clears its bar; an empty or whitespace mention short-circuits without
/// querying.
pub fn resolve_entity(
    store: &dyn IRelationalStore,
    mention: &str,
    type_hint: Option<&str>,
) -> CausewayResult<Option<ResolvedEntity>> {
    let mention = mention.trim();
    if mention.is_empty() {
        return Ok(None);
    }

    let candidates = store.candidates_for_mention(mention, type_hint, CANDIDATE_LIMIT)?;
    if candidates.is_empty() {
        tracing::debug!(mention, "entity resolver: no candidates");
        return Ok(None);
    }

    let norm_mention = norm(mention);

    for entity in &candidates {
        if norm(&entity.canonical_name) == norm_mention || norm(&entity.name) == norm_mention {
            tracing::debug!(mention, entity_id = %entity.id, "entity resolver: exact");
            return Ok(Some(resolved(entity, 1.0, ResolveMethod::Exact)));
        }
    }

    for entity in &candidates {
        if check_aliases(entity, &norm_mention) {
            tracing::debug!(mention, entity_id = %entity.id, "entity resolver: alias");
            return Ok(Some(resolved(entity, 0.95, ResolveMethod::Alias)));
        }
    }

    // Score against both names, take the higher; keep the global best.
    let mut best: Option<(&Entity, f64)> = None;
    for entity in &candidates {
        let ratio = fuzzy_ratio(mention, &entity.canonical_name)
            .max(fuzzy_ratio(mention, &entity.name));
        if best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
            best = Some((entity, ratio));
        }
    }

    if let Some((entity, ratio)) = best {
        if ratio >= FUZZY_THRESHOLD {
            tracing::debug!(mention, entity_id = %entity.id, ratio, "entity resolver: fuzzy");
            return Ok(Some(resolved(entity, crate::round4(ratio), ResolveMethod::Fuzzy)));
        }
    }

    tracing::debug!(mention, "entity resolver: no match");
    Ok(None)
}

/// Planner-facing wrapper: map an optional mention to an optional entity
/// id. Resolution failure is "no filter applied", never an error.
pub fn resolve_entity_filter(
    store: &dyn IRelationalStore,
    entity_filter: Option<&str>,
) -> CausewayResult<Option<Uuid>> {
    let Some(mention) = entity_filter else {
        return Ok(None);
    };
    match resolve_entity(store, mention, None)? {
        Some(result) => Ok(Some(result.entity_id)),
        None => {
            tracing::warn!(mention, "entity filter unresolved");
            Ok(None)
        }
    }
}
