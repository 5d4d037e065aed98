//! Provider Identity Value Objects
//!
//! A provider row describes one configured upstream AI vendor account:
//! which API dialect it speaks, where it lives, and how the operator has
//! ranked it. Rows are created and edited by the external admin surface;
//! the engine consumes them read-only through catalog snapshots.

use crate::ports::providers::crypto::EncryptedData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream API dialect a provider speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    /// OpenAI chat completions dialect
    OpenAi,
    /// Anthropic messages dialect
    Anthropic,
    /// Google generative language dialect
    Google,
    /// Mistral platform dialect (OpenAI-compatible)
    Mistral,
    /// Any other OpenAI-compatible endpoint (vLLM, Ollama, proxies)
    OpenAiCompatible,
}

impl ProviderType {
    /// All known provider types, in a stable order
    pub const ALL: [ProviderType; 5] = [
        ProviderType::OpenAi,
        ProviderType::Anthropic,
        ProviderType::Google,
        ProviderType::Mistral,
        ProviderType::OpenAiCompatible,
    ];

    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Mistral => "mistral",
            Self::OpenAiCompatible => "openai_compatible",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "google" => Ok(Self::Google),
            "mistral" => Ok(Self::Mistral),
            "openai_compatible" => Ok(Self::OpenAiCompatible),
            other => Err(crate::error::Error::invalid_argument(format!(
                "Unknown provider type: {}",
                other
            ))),
        }
    }
}

/// Operator-curated health annotation carried on the provider row
///
/// Distinct from the live cooldown state in the health tracker: this is
/// the last persisted observation, refreshed with catalog snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    /// Provider is functioning normally
    Healthy,
    /// Provider is experiencing issues but still usable
    Degraded,
    /// No recent observation
    #[default]
    Unknown,
}

/// One configured upstream provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    /// Unique provider name; (name, provider_type) is unique catalog-wide
    pub name: String,
    /// Upstream API dialect
    pub provider_type: ProviderType,
    /// Base endpoint URL for the dialect
    pub base_url: String,
    /// Operator-level encrypted credential, if the operator fronts cost
    pub operator_credential: Option<EncryptedData>,
    /// Static priority weight used as a scoring tie-break (higher first)
    pub priority: u32,
    /// Disabled providers are invisible to candidate selection
    pub enabled: bool,
    /// Last persisted health annotation
    pub status: ProviderStatus,
}

impl Provider {
    /// Create an enabled provider with defaults for the optional fields
    pub fn new<N: Into<String>, U: Into<String>>(
        name: N,
        provider_type: ProviderType,
        base_url: U,
    ) -> Self {
        Self {
            name: name.into(),
            provider_type,
            base_url: base_url.into(),
            operator_credential: None,
            priority: 0,
            enabled: true,
            status: ProviderStatus::Unknown,
        }
    }

    /// Set the static priority weight
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Attach an operator-level encrypted credential
    pub fn with_operator_credential(mut self, credential: EncryptedData) -> Self {
        self.operator_credential = Some(credential);
        self
    }
}
