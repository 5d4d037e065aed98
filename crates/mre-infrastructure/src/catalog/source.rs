//! Catalog Sources
//!
//! [`ConfigCatalogSource`] compiles snapshots from the configuration
//! surface; [`StaticCatalogSource`] serves a fixed snapshot for tests
//! and embedded wiring.

use crate::config::types::app::AppConfig;
use crate::config::types::catalog::CatalogConfig;
use crate::config::types::routing::{PolicyConfig, PowerLevelsConfig};
use async_trait::async_trait;
use chrono::Utc;
use mre_domain::error::Result;
use mre_domain::ports::infrastructure::catalog::{CatalogSnapshot, CatalogSource};

/// Source serving a fixed, pre-built snapshot
pub struct StaticCatalogSource {
    snapshot: CatalogSnapshot,
}

impl StaticCatalogSource {
    /// Wrap an existing snapshot
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn load(&self) -> Result<CatalogSnapshot> {
        let mut snapshot = self.snapshot.clone();
        snapshot.loaded_at = Utc::now();
        Ok(snapshot)
    }
}

/// Source compiling snapshots from the configuration surface
///
/// Deployments fronting the admin store replace this with an adapter
/// over that store; the registry and engine are indifferent.
pub struct ConfigCatalogSource {
    catalog: CatalogConfig,
    policy: PolicyConfig,
    power_levels: PowerLevelsConfig,
}

impl ConfigCatalogSource {
    /// Build a source from the loaded application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            catalog: config.catalog.clone(),
            policy: config.policy.clone(),
            power_levels: config.power_levels.clone(),
        }
    }
}

#[async_trait]
impl CatalogSource for ConfigCatalogSource {
    async fn load(&self) -> Result<CatalogSnapshot> {
        let providers = self
            .catalog
            .providers
            .iter()
            .map(|entry| entry.to_domain())
            .collect::<Result<Vec<_>>>()?;
        let models = self
            .catalog
            .models
            .iter()
            .map(|entry| entry.to_domain())
            .collect();

        let snapshot = CatalogSnapshot {
            providers,
            models,
            policy: self.policy.to_domain()?,
            power_profiles: self.power_levels.to_domain()?,
            loaded_at: Utc::now(),
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}
