//! Configuration loader
//!
//! Loads configuration from defaults, a TOML file and environment
//! variables (merged in that order via Figment), then validates the
//! result before anything reaches the engine. Invalid weight vectors are
//! rejected here, never reaching the scorer.

use crate::config::types::app::AppConfig;
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use mre_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `MRE_LOGGING_LEVEL`)
    pub fn load(&self) -> Result<AppConfig> {
        // Start with default configuration
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        // Add configuration file if specified
        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else {
            // Try to find default config file
            if let Some(default_path) = Self::find_default_config_path() {
                figment = figment.merge(Toml::file(&default_path));
                log_config_loaded(&default_path, true);
            }
        }

        // Add environment variables
        // Uses underscore as separator for nested keys (e.g., MRE_LOGGING_LEVEL)
        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("_"));

        // Extract and deserialize configuration
        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        // Validate configuration
        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Reload configuration (useful for the catalog refresher)
    pub fn reload(&self) -> Result<AppConfig> {
        self.load()
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find default configuration file paths to try
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
            dirs::config_dir()
                .map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME))
                .unwrap_or_default(),
        ];

        candidates.into_iter().find(|path| path.exists())
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections before the engine
/// consumes them.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_policy_config(config)?;
    validate_power_levels_config(config)?;
    validate_limits_config(config)?;
    validate_catalog_config(config)?;
    validate_crypto_config(config)?;
    Ok(())
}

fn validate_policy_config(config: &AppConfig) -> Result<()> {
    config.policy.to_domain()?;
    Ok(())
}

fn validate_power_levels_config(config: &AppConfig) -> Result<()> {
    config.power_levels.to_domain()?;
    Ok(())
}

fn validate_limits_config(config: &AppConfig) -> Result<()> {
    if config.limits.window_secs == 0 {
        return Err(Error::configuration("Rate limit window cannot be 0"));
    }
    if config.limits.max_requests == 0 {
        return Err(Error::configuration(
            "Rate limit must admit at least one request per window",
        ));
    }
    Ok(())
}

fn validate_catalog_config(config: &AppConfig) -> Result<()> {
    if config.catalog.refresh_interval_secs == 0 {
        return Err(Error::configuration(
            "Catalog refresh interval cannot be 0",
        ));
    }
    for provider in &config.catalog.providers {
        if provider.name.is_empty() {
            return Err(Error::configuration("Provider name cannot be empty"));
        }
        if let Some(credential) = &provider.operator_credential {
            credential.decode().map_err(|err| {
                Error::configuration(format!(
                    "Operator credential for provider '{}' is malformed: {}",
                    provider.name, err
                ))
            })?;
        }
    }
    Ok(())
}

fn validate_crypto_config(config: &AppConfig) -> Result<()> {
    if let Some(key_b64) = &config.crypto.master_key_b64 {
        crate::crypto::CryptoService::from_base64_key(key_b64)?;
    }
    Ok(())
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration builder for programmatic configuration
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: crate::config::types::logging::LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set the active routing policy
    pub fn with_policy(mut self, policy: crate::config::types::routing::PolicyConfig) -> Self {
        self.config.policy = policy;
        self
    }

    /// Set catalog settings and seed rows
    pub fn with_catalog(mut self, catalog: crate::config::types::catalog::CatalogConfig) -> Self {
        self.config.catalog = catalog;
        self
    }

    /// Set the caller-side rate limit
    pub fn with_limits(mut self, limits: crate::config::types::limits::RateLimitConfig) -> Self {
        self.config.limits = limits;
        self
    }

    /// Set the master key
    pub fn with_master_key_b64<S: Into<String>>(mut self, key_b64: S) -> Self {
        self.config.crypto.master_key_b64 = Some(key_b64.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
