//! Catalog seed configuration types
//!
//! The configuration surface doubles as the catalog source when the
//! engine is not backed by the admin store: provider and model rows are
//! declared here and compiled into snapshots by
//! [`crate::catalog::source::ConfigCatalogSource`].

use crate::constants::CATALOG_REFRESH_INTERVAL_SECS;
use mre_domain::error::Result;
use mre_domain::ports::providers::crypto::EncryptedData;
use mre_domain::value_objects::model::ModelSpec;
use mre_domain::value_objects::provider::{Provider, ProviderStatus, ProviderType};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Catalog refresh settings plus seed rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Snapshot refresh interval in seconds
    pub refresh_interval_secs: u64,

    /// Configured providers
    #[serde(default)]
    pub providers: Vec<ProviderEntry>,

    /// Configured models
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: CATALOG_REFRESH_INTERVAL_SECS,
            providers: Vec::new(),
            models: Vec::new(),
        }
    }
}

/// Encrypted operator credential as carried in configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorCredentialEntry {
    /// Base64-encoded ciphertext
    pub ciphertext_b64: String,

    /// Base64-encoded nonce
    pub nonce_b64: String,
}

impl OperatorCredentialEntry {
    /// Decode into the domain ciphertext container
    pub fn decode(&self) -> Result<EncryptedData> {
        EncryptedData::from_base64(&self.ciphertext_b64, &self.nonce_b64)
    }
}

/// One provider row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// Unique provider name
    pub name: String,

    /// Upstream API dialect
    pub provider_type: ProviderType,

    /// Base endpoint URL
    pub base_url: String,

    /// Static priority weight (higher wins scoring ties)
    #[serde(default)]
    pub priority: u32,

    /// Whether the provider participates in routing
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Operator-level encrypted credential, if the operator fronts cost
    #[serde(default)]
    pub operator_credential: Option<OperatorCredentialEntry>,
}

impl ProviderEntry {
    /// Build the domain provider row
    pub fn to_domain(&self) -> Result<Provider> {
        let operator_credential = self
            .operator_credential
            .as_ref()
            .map(OperatorCredentialEntry::decode)
            .transpose()?;
        Ok(Provider {
            name: self.name.clone(),
            provider_type: self.provider_type,
            base_url: self.base_url.clone(),
            operator_credential,
            priority: self.priority,
            enabled: self.enabled,
            status: ProviderStatus::Unknown,
        })
    }
}

/// One model row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Model identifier as the upstream API expects it
    pub id: String,

    /// Name of the owning provider
    pub provider: String,

    /// Cost per 1K input tokens
    pub input_cost_per_1k: f64,

    /// Cost per 1K output tokens
    pub output_cost_per_1k: f64,

    /// Maximum context window in tokens
    pub context_length: u32,

    /// Rolling average latency in milliseconds
    pub avg_latency_ms: f64,

    /// Rolling quality score in [0, 1]
    pub quality: f64,

    /// Whether the model participates in routing
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl ModelEntry {
    /// Build the domain model row
    pub fn to_domain(&self) -> ModelSpec {
        ModelSpec {
            id: self.id.clone(),
            provider: self.provider.clone(),
            input_cost_per_1k: self.input_cost_per_1k,
            output_cost_per_1k: self.output_cost_per_1k,
            context_length: self.context_length,
            avg_latency_ms: self.avg_latency_ms,
            quality: self.quality,
            enabled: self.enabled,
        }
    }
}
