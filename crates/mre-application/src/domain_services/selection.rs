//! Candidate Filtering
//!
//! Builds the eligible (provider, model) set for one request from the
//! current catalog snapshot, the live health view, the caller's usable
//! credential types, and the power level's allowlist.

use crate::domain_services::scoring::Candidate;
use mre_domain::ports::infrastructure::catalog::CatalogSnapshot;
use mre_domain::ports::infrastructure::routing::HealthTracker;
use mre_domain::value_objects::power_level::PowerLevelProfile;
use mre_domain::value_objects::provider::ProviderType;
use std::collections::HashSet;
use tracing::debug;

/// Build the eligible candidate set for a request
///
/// Filters out disabled providers/models, providers inside an active
/// cooldown, providers with no usable credential for this caller, and
/// models whose context window cannot fit the declared input size. The
/// profile allowlist is applied last: when it empties the set, selection
/// falls back to the full filtered set so a level never produces a hard
/// empty set solely due to allowlisting.
pub fn eligible_candidates(
    snapshot: &CatalogSnapshot,
    profile: &PowerLevelProfile,
    declared_input_tokens: u32,
    available_types: &HashSet<ProviderType>,
    health: &dyn HealthTracker,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for provider in &snapshot.providers {
        if !provider.enabled {
            continue;
        }
        if health.in_cooldown(&provider.name) {
            debug!(provider = %provider.name, "excluding provider in cooldown");
            continue;
        }
        let has_credential = provider.operator_credential.is_some()
            || available_types.contains(&provider.provider_type);
        if !has_credential {
            debug!(provider = %provider.name, "excluding provider without usable credential");
            continue;
        }

        let health_view = health.snapshot(&provider.name);
        for model in snapshot.models_of(&provider.name) {
            if !model.enabled || !model.fits_context(declared_input_tokens) {
                continue;
            }
            candidates.push(Candidate {
                provider: provider.clone(),
                model: model.clone(),
                health: health_view,
            });
        }
    }

    if profile.allowlist.is_empty() {
        return candidates;
    }

    let allowed: Vec<Candidate> = candidates
        .iter()
        .filter(|c| profile.allowlist.contains(&c.provider.name))
        .cloned()
        .collect();
    if allowed.is_empty() {
        debug!(
            level = %profile.level,
            "allowlist excluded every candidate; falling back to full set"
        );
        candidates
    } else {
        allowed
    }
}
