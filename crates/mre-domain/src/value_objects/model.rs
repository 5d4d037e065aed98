//! Model Catalog Value Objects

use crate::constants::COST_UNIT_TOKENS;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One model offered by a provider
///
/// ## Business Rules
///
/// - Cost and latency figures must be non-negative
/// - Quality score must fall in [0, 1]
/// - Context length must be positive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelSpec {
    /// Model identifier as the upstream API expects it
    pub id: String,
    /// Name of the provider this model belongs to
    pub provider: String,
    /// Cost per 1K input tokens, in the operator's accounting currency
    pub input_cost_per_1k: f64,
    /// Cost per 1K output tokens
    pub output_cost_per_1k: f64,
    /// Maximum context window in tokens
    pub context_length: u32,
    /// Rolling average latency in milliseconds
    pub avg_latency_ms: f64,
    /// Rolling quality score in [0, 1], operator-curated or benchmark-derived
    pub quality: f64,
    /// Disabled models are invisible to candidate selection
    pub enabled: bool,
}

impl ModelSpec {
    /// Check the model invariants
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::invalid_argument("Model id cannot be empty"));
        }
        if self.input_cost_per_1k < 0.0 || self.output_cost_per_1k < 0.0 {
            return Err(Error::invalid_argument(format!(
                "Model '{}' has negative cost",
                self.id
            )));
        }
        if self.avg_latency_ms < 0.0 {
            return Err(Error::invalid_argument(format!(
                "Model '{}' has negative latency",
                self.id
            )));
        }
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(Error::invalid_argument(format!(
                "Model '{}' quality {} outside [0, 1]",
                self.id, self.quality
            )));
        }
        if self.context_length == 0 {
            return Err(Error::invalid_argument(format!(
                "Model '{}' has zero context length",
                self.id
            )));
        }
        Ok(())
    }

    /// Combined per-1K-token cost used by the scorer
    pub fn scoring_cost(&self) -> f64 {
        self.input_cost_per_1k + self.output_cost_per_1k
    }

    /// Compute the cost of a completed call from its token counts
    pub fn estimate_cost(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        let unit = f64::from(COST_UNIT_TOKENS);
        f64::from(input_tokens) / unit * self.input_cost_per_1k
            + f64::from(output_tokens) / unit * self.output_cost_per_1k
    }

    /// Whether the declared input size fits this model's context window
    pub fn fits_context(&self, declared_input_tokens: u32) -> bool {
        declared_input_tokens <= self.context_length
    }
}
