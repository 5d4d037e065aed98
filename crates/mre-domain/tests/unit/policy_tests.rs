//! Unit tests for routing policy value objects

use mre_domain::value_objects::{RoutingPolicy, RoutingStrategy, ScoringWeights};
use std::time::Duration;

#[test]
fn test_weights_summing_to_one_accepted() {
    let weights = ScoringWeights::new(0.5, 0.3, 0.2).expect("valid weights");
    assert!((weights.cost - 0.5).abs() < 1e-12);
}

#[test]
fn test_weights_not_summing_to_one_rejected() {
    assert!(ScoringWeights::new(0.5, 0.3, 0.3).is_err());
    assert!(ScoringWeights::new(0.2, 0.2, 0.2).is_err());
}

#[test]
fn test_weights_within_epsilon_accepted() {
    // Float noise below the tolerance must not reject a policy
    assert!(ScoringWeights::new(0.5, 0.3, 0.2 + 1e-9).is_ok());
}

#[test]
fn test_weight_outside_unit_interval_rejected() {
    assert!(ScoringWeights::new(1.5, -0.3, -0.2).is_err());
}

#[test]
fn test_strategy_presets_are_valid() {
    for strategy in [
        RoutingStrategy::Cost,
        RoutingStrategy::Latency,
        RoutingStrategy::Balanced,
        RoutingStrategy::Custom,
    ] {
        assert!(ScoringWeights::for_strategy(strategy).validate().is_ok());
    }
}

#[test]
fn test_cost_strategy_leans_on_cost() {
    let weights = ScoringWeights::for_strategy(RoutingStrategy::Cost);
    assert!(weights.cost > weights.latency);
    assert!(weights.cost > weights.quality);
}

#[test]
fn test_default_policy_is_valid() {
    assert!(RoutingPolicy::default().validate().is_ok());
}

#[test]
fn test_zero_request_timeout_rejected() {
    let policy = RoutingPolicy {
        request_timeout: Duration::ZERO,
        ..RoutingPolicy::default()
    };
    assert!(policy.validate().is_err());
}

#[test]
fn test_total_timeout_shorter_than_attempt_rejected() {
    let policy = RoutingPolicy {
        request_timeout: Duration::from_secs(30),
        total_timeout: Duration::from_secs(10),
        ..RoutingPolicy::default()
    };
    assert!(policy.validate().is_err());
}

#[test]
fn test_attempt_budget_counts_first_attempt() {
    let policy = RoutingPolicy {
        max_retries: 2,
        ..RoutingPolicy::default()
    };
    assert_eq!(policy.attempt_budget(), 3);
}
