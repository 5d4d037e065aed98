//! Routing Policy Value Objects
//!
//! The routing policy is the single active configuration driving the
//! scorer and the dispatcher: a strategy tag, a weight vector, the
//! fallback ordering, and the retry/timeout knobs. Policies violating the
//! weight-sum invariant are rejected at configuration time and never
//! reach the scorer.

use crate::constants::{
    DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_TOTAL_TIMEOUT_SECS, WEIGHT_SUM_EPSILON,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Objective the active policy optimizes for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStrategy {
    /// Minimize cost
    Cost,
    /// Minimize latency
    Latency,
    /// Balance cost, latency and quality
    #[default]
    Balanced,
    /// Operator-supplied custom weight vector
    Custom,
}

/// Weight vector over the three scoring dimensions
///
/// Invariant: the three weights sum to 1.0 within [`WEIGHT_SUM_EPSILON`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight on the normalized cost score
    pub cost: f64,
    /// Weight on the normalized latency score
    pub latency: f64,
    /// Weight on the raw quality score
    pub quality: f64,
}

impl ScoringWeights {
    /// Create a weight vector; fails if the sum invariant does not hold
    pub fn new(cost: f64, latency: f64, quality: f64) -> Result<Self> {
        let weights = Self {
            cost,
            latency,
            quality,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Check the sum and range invariants
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("cost", self.cost),
            ("latency", self.latency),
            ("quality", self.quality),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::configuration(format!(
                    "Weight '{}' = {} outside [0, 1]",
                    name, value
                )));
            }
        }
        let sum = self.cost + self.latency + self.quality;
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(Error::configuration(format!(
                "Scoring weights must sum to 1.0, got {}",
                sum
            )));
        }
        Ok(())
    }

    /// Canonical weight vector for a named strategy
    pub fn for_strategy(strategy: RoutingStrategy) -> Self {
        match strategy {
            RoutingStrategy::Cost => Self {
                cost: 0.6,
                latency: 0.2,
                quality: 0.2,
            },
            RoutingStrategy::Latency => Self {
                cost: 0.2,
                latency: 0.6,
                quality: 0.2,
            },
            RoutingStrategy::Balanced | RoutingStrategy::Custom => Self {
                cost: 0.35,
                latency: 0.3,
                quality: 0.35,
            },
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::for_strategy(RoutingStrategy::Balanced)
    }
}

/// The active routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingPolicy {
    /// Strategy tag for auditing; `Custom` means the weights were hand-set
    pub strategy: RoutingStrategy,
    /// Weight vector applied when no power level override is in effect
    pub weights: ScoringWeights,
    /// Ordered fallback provider names consulted when scores tie exactly
    pub fallback_order: Vec<String>,
    /// Retry budget on top of the first attempt
    pub max_retries: u32,
    /// Base inter-retry delay, scaled linearly by attempt number
    pub retry_delay: Duration,
    /// Per-attempt timeout
    pub request_timeout: Duration,
    /// Wall-clock budget for the whole multi-attempt sequence
    pub total_timeout: Duration,
}

impl RoutingPolicy {
    /// Check the policy invariants
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if self.request_timeout.is_zero() {
            return Err(Error::configuration("Per-attempt timeout cannot be zero"));
        }
        if self.total_timeout < self.request_timeout {
            return Err(Error::configuration(
                "Total timeout cannot be shorter than the per-attempt timeout",
            ));
        }
        Ok(())
    }

    /// Total number of upstream attempts the dispatcher may consume
    pub fn attempt_budget(&self) -> u32 {
        self.max_retries + 1
    }
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            strategy: RoutingStrategy::Balanced,
            weights: ScoringWeights::default(),
            fallback_order: Vec::new(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            total_timeout: Duration::from_secs(DEFAULT_TOTAL_TIMEOUT_SECS),
        }
    }
}
