//! Routing policy and power level configuration types

use mre_domain::error::Result;
use mre_domain::value_objects::policy::{RoutingPolicy, RoutingStrategy, ScoringWeights};
use mre_domain::value_objects::power_level::{PowerLevel, PowerLevelProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Active routing policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Strategy tag: cost, latency, balanced or custom
    pub strategy: RoutingStrategy,

    /// Weight on the normalized cost score
    pub cost_weight: f64,

    /// Weight on the normalized latency score
    pub latency_weight: f64,

    /// Weight on the raw quality score
    pub quality_weight: f64,

    /// Ordered fallback provider names for exact-tie breaking
    pub fallback_order: Vec<String>,

    /// Retry budget on top of the first attempt
    pub max_retries: u32,

    /// Base inter-retry delay in milliseconds
    pub retry_delay_ms: u64,

    /// Per-attempt timeout in seconds
    pub request_timeout_secs: u64,

    /// Wall-clock budget for the whole attempt sequence in seconds
    pub total_timeout_secs: u64,
}

impl PolicyConfig {
    /// Build and validate the domain policy
    pub fn to_domain(&self) -> Result<RoutingPolicy> {
        let weights = match self.strategy {
            RoutingStrategy::Custom => ScoringWeights::new(
                self.cost_weight,
                self.latency_weight,
                self.quality_weight,
            )?,
            strategy => ScoringWeights::for_strategy(strategy),
        };
        let policy = RoutingPolicy {
            strategy: self.strategy,
            weights,
            fallback_order: self.fallback_order.clone(),
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            total_timeout: Duration::from_secs(self.total_timeout_secs),
        };
        policy.validate()?;
        Ok(policy)
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let policy = RoutingPolicy::default();
        Self {
            strategy: policy.strategy,
            cost_weight: policy.weights.cost,
            latency_weight: policy.weights.latency,
            quality_weight: policy.weights.quality,
            fallback_order: Vec::new(),
            max_retries: policy.max_retries,
            retry_delay_ms: policy.retry_delay.as_millis() as u64,
            request_timeout_secs: policy.request_timeout.as_secs(),
            total_timeout_secs: policy.total_timeout.as_secs(),
        }
    }
}

/// One power level's weighting and allowlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerLevelProfileConfig {
    /// Weight on the normalized cost score
    pub cost_weight: f64,

    /// Weight on the normalized latency score
    pub latency_weight: f64,

    /// Weight on the raw quality score
    pub quality_weight: f64,

    /// Provider names this level is restricted to; empty means unrestricted
    pub allowlist: Vec<String>,
}

impl PowerLevelProfileConfig {
    fn from_profile(profile: &PowerLevelProfile) -> Self {
        Self {
            cost_weight: profile.weights.cost,
            latency_weight: profile.weights.latency,
            quality_weight: profile.weights.quality,
            allowlist: profile.allowlist.clone(),
        }
    }

    /// Build and validate the domain profile for a level
    pub fn to_domain(&self, level: PowerLevel) -> Result<PowerLevelProfile> {
        let profile = PowerLevelProfile {
            level,
            weights: ScoringWeights::new(
                self.cost_weight,
                self.latency_weight,
                self.quality_weight,
            )?,
            allowlist: self.allowlist.clone(),
        };
        Ok(profile)
    }
}

/// Profiles for the three user-facing power levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerLevelsConfig {
    /// Eco profile
    pub eco: PowerLevelProfileConfig,

    /// Balanced profile
    pub balanced: PowerLevelProfileConfig,

    /// Precision profile
    pub precision: PowerLevelProfileConfig,
}

impl PowerLevelsConfig {
    /// Build and validate all domain profiles
    pub fn to_domain(&self) -> Result<HashMap<PowerLevel, PowerLevelProfile>> {
        let mut profiles = HashMap::new();
        profiles.insert(PowerLevel::Eco, self.eco.to_domain(PowerLevel::Eco)?);
        profiles.insert(
            PowerLevel::Balanced,
            self.balanced.to_domain(PowerLevel::Balanced)?,
        );
        profiles.insert(
            PowerLevel::Precision,
            self.precision.to_domain(PowerLevel::Precision)?,
        );
        Ok(profiles)
    }
}

impl Default for PowerLevelsConfig {
    fn default() -> Self {
        Self {
            eco: PowerLevelProfileConfig::from_profile(&PowerLevelProfile::defaults_for(
                PowerLevel::Eco,
            )),
            balanced: PowerLevelProfileConfig::from_profile(&PowerLevelProfile::defaults_for(
                PowerLevel::Balanced,
            )),
            precision: PowerLevelProfileConfig::from_profile(&PowerLevelProfile::defaults_for(
                PowerLevel::Precision,
            )),
        }
    }
}
