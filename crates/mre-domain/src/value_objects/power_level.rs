//! Power Level Profiles
//!
//! A power level is the user-facing knob over the cost-vs-quality
//! tradeoff. Each level resolves to a weight vector (overriding the
//! active policy's weights) and an optional provider allowlist.

use crate::error::{Error, Result};
use crate::value_objects::policy::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-selected service tier for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PowerLevel {
    /// Cheapest acceptable answer
    Eco,
    /// Balanced cost and quality
    #[default]
    Balanced,
    /// Best available answer, cost be damned
    Precision,
}

impl PowerLevel {
    /// All levels, in ascending order of spend appetite
    pub const ALL: [PowerLevel; 3] = [
        PowerLevel::Eco,
        PowerLevel::Balanced,
        PowerLevel::Precision,
    ];

    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eco => "eco",
            Self::Balanced => "balanced",
            Self::Precision => "precision",
        }
    }
}

impl fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PowerLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eco" => Ok(Self::Eco),
            "balanced" => Ok(Self::Balanced),
            "precision" => Ok(Self::Precision),
            other => Err(Error::invalid_argument(format!(
                "Unknown power level: {}",
                other
            ))),
        }
    }
}

/// Weighting + allowlist profile backing one power level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerLevelProfile {
    /// The level this profile backs
    pub level: PowerLevel,
    /// Weight vector overriding the active policy's weights
    pub weights: ScoringWeights,
    /// Provider names this level is restricted to; empty means unrestricted
    pub allowlist: Vec<String>,
}

impl PowerLevelProfile {
    /// Compiled-in profile for a level, used when configuration is silent
    pub fn defaults_for(level: PowerLevel) -> Self {
        let weights = match level {
            PowerLevel::Eco => ScoringWeights {
                cost: 0.6,
                latency: 0.2,
                quality: 0.2,
            },
            PowerLevel::Balanced => ScoringWeights {
                cost: 0.35,
                latency: 0.3,
                quality: 0.35,
            },
            PowerLevel::Precision => ScoringWeights {
                cost: 0.1,
                latency: 0.2,
                quality: 0.7,
            },
        };
        Self {
            level,
            weights,
            allowlist: Vec::new(),
        }
    }

    /// Check the profile invariants
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()
    }
}
