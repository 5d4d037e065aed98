//! Catalog Port
//!
//! The engine consumes a read-only, periodically refreshed snapshot of
//! the provider/model/policy rows owned by the external admin surface.
//! Snapshots are immutable once published; a whole new snapshot is
//! swapped in atomically so readers never observe a half-updated catalog.

use crate::error::{Error, Result};
use crate::value_objects::model::ModelSpec;
use crate::value_objects::policy::RoutingPolicy;
use crate::value_objects::power_level::{PowerLevel, PowerLevelProfile};
use crate::value_objects::provider::Provider;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Consistent view of the configured routing universe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Configured providers
    pub providers: Vec<Provider>,
    /// Configured models, each referencing a provider by name
    pub models: Vec<ModelSpec>,
    /// The active routing policy
    pub policy: RoutingPolicy,
    /// Configured power level profiles; missing levels use compiled-in defaults
    pub power_profiles: HashMap<PowerLevel, PowerLevelProfile>,
    /// When this snapshot was loaded from the external source
    pub loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Create an empty snapshot with a default policy
    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
            models: Vec::new(),
            policy: RoutingPolicy::default(),
            power_profiles: HashMap::new(),
            loaded_at: Utc::now(),
        }
    }

    /// Check snapshot invariants before it is swapped in
    ///
    /// Rejects duplicate (name, type) provider pairs, models referencing
    /// unknown providers, invalid model figures, and policies or profiles
    /// violating the weight-sum invariant.
    pub fn validate(&self) -> Result<()> {
        self.policy.validate()?;
        for profile in self.power_profiles.values() {
            profile.validate()?;
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            if !seen.insert((provider.name.as_str(), provider.provider_type)) {
                return Err(Error::configuration(format!(
                    "Duplicate provider ({}, {})",
                    provider.name, provider.provider_type
                )));
            }
        }

        let names: HashSet<&str> = self.providers.iter().map(|p| p.name.as_str()).collect();
        for model in &self.models {
            model.validate()?;
            if !names.contains(model.provider.as_str()) {
                return Err(Error::configuration(format!(
                    "Model '{}' references unknown provider '{}'",
                    model.id, model.provider
                )));
            }
        }
        Ok(())
    }

    /// Look up a provider by name
    pub fn provider(&self, name: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// All models belonging to a provider
    pub fn models_of<'a>(&'a self, provider: &str) -> impl Iterator<Item = &'a ModelSpec> {
        self.models.iter().filter(move |m| m.provider == provider)
    }

    /// Profile for a power level, configured or compiled-in
    pub fn profile(&self, level: PowerLevel) -> PowerLevelProfile {
        self.power_profiles
            .get(&level)
            .cloned()
            .unwrap_or_else(|| PowerLevelProfile::defaults_for(level))
    }
}

/// Loads catalog snapshots from the external source of truth
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load a fresh snapshot
    async fn load(&self) -> Result<CatalogSnapshot>;
}

/// Read access to the currently published snapshot
///
/// Reads are wait-free; the returned Arc stays consistent even if a
/// refresh swaps the catalog mid-request.
pub trait CatalogReader: Send + Sync {
    /// The currently published snapshot
    fn snapshot(&self) -> Arc<CatalogSnapshot>;
}
