//! Deterministic Candidate Scoring
//!
//! Pure function from a candidate set and a weight vector to a ranked
//! order. Cost and latency are normalized against the maximum observed
//! value within the current candidate set, not globally; quality is used
//! as-is. Health penalties are multiplicative. Ties break on static
//! provider priority, then the policy fallback order, then names, so
//! repeated calls over the same inputs always produce the same order.

use mre_domain::constants::{
    ERROR_RATE_PENALTY_FACTOR, RATE_PRESSURE_PENALTY, RATE_PRESSURE_THRESHOLD,
};
use mre_domain::ports::infrastructure::routing::HealthSnapshot;
use mre_domain::value_objects::model::ModelSpec;
use mre_domain::value_objects::policy::ScoringWeights;
use mre_domain::value_objects::provider::Provider;

/// One (provider, model) pair eligible for a request, with the health
/// view sampled at selection time
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The provider half of the pair
    pub provider: Provider,
    /// The model half of the pair
    pub model: ModelSpec,
    /// Health record sampled before scoring
    pub health: HealthSnapshot,
}

/// A candidate with its composite score
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    /// The provider half of the pair
    pub provider: Provider,
    /// The model half of the pair
    pub model: ModelSpec,
    /// Composite score after penalties; higher is better
    pub score: f64,
}

/// Rank candidates by composite score, descending
///
/// `fallback_order` is the policy's ordered provider list, consulted only
/// to break exact score-and-priority ties.
pub fn rank(
    candidates: Vec<Candidate>,
    weights: &ScoringWeights,
    fallback_order: &[String],
) -> Vec<ScoredCandidate> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let costs: Vec<f64> = candidates.iter().map(|c| c.model.scoring_cost()).collect();
    let latencies: Vec<f64> = candidates.iter().map(|c| c.model.avg_latency_ms).collect();
    let (min_cost, max_cost) = spread(&costs);
    let (min_latency, max_latency) = spread(&latencies);

    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let cost_score = normalized(candidate.model.scoring_cost(), min_cost, max_cost);
            let latency_score = normalized(candidate.model.avg_latency_ms, min_latency, max_latency);
            let mut composite = weights.cost * cost_score
                + weights.latency * latency_score
                + weights.quality * candidate.model.quality;

            composite *= 1.0 - ERROR_RATE_PENALTY_FACTOR * candidate.health.error_rate;
            if candidate.health.rate_limit_utilization > RATE_PRESSURE_THRESHOLD {
                composite *= RATE_PRESSURE_PENALTY;
            }

            ScoredCandidate {
                provider: candidate.provider,
                model: candidate.model,
                score: composite,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.provider.priority.cmp(&a.provider.priority))
            .then_with(|| {
                fallback_position(fallback_order, &a.provider.name)
                    .cmp(&fallback_position(fallback_order, &b.provider.name))
            })
            .then_with(|| a.provider.name.cmp(&b.provider.name))
            .then_with(|| a.model.id.cmp(&b.model.id))
    });
    scored
}

fn spread(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    (min, max)
}

/// Normalize a cost/latency value against the candidate-set maximum
///
/// A dimension with no spread (all-equal values, or an all-zero maximum)
/// cannot discriminate between candidates and contributes a full score of
/// 1.0 to each, which also keeps a single-candidate set away from a
/// division by zero.
fn normalized(value: f64, min: f64, max: f64) -> f64 {
    if max <= 0.0 || (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        1.0 - value / max
    }
}

fn fallback_position(fallback_order: &[String], provider: &str) -> usize {
    fallback_order
        .iter()
        .position(|name| name == provider)
        .unwrap_or(usize::MAX)
}
