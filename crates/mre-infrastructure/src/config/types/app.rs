//! Top-level application configuration

use crate::config::types::catalog::CatalogConfig;
use crate::config::types::crypto::CryptoConfig;
use crate::config::types::limits::RateLimitConfig;
use crate::config::types::logging::LoggingConfig;
use crate::config::types::resilience::ResilienceConfig;
use crate::config::types::routing::{PolicyConfig, PowerLevelsConfig};
use serde::{Deserialize, Serialize};

/// Aggregated engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Active routing policy
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Power level profiles
    #[serde(default)]
    pub power_levels: PowerLevelsConfig,

    /// Health/backoff/stickiness settings
    #[serde(default)]
    pub resilience: ResilienceConfig,

    /// Caller-side rate limit settings
    #[serde(default)]
    pub limits: RateLimitConfig,

    /// Catalog refresh settings and seed rows
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Credential crypto settings
    #[serde(default)]
    pub crypto: CryptoConfig,
}
