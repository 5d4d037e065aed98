//! Typed configuration sections

/// Top-level application configuration
pub mod app;
/// Catalog seed entries and refresh settings
pub mod catalog;
/// Master key configuration
pub mod crypto;
/// Caller-side rate limit settings
pub mod limits;
/// Logging settings
pub mod logging;
/// Routing policy and power level settings
pub mod routing;
/// Health/backoff/stickiness settings
pub mod resilience;

pub use app::AppConfig;
pub use catalog::{CatalogConfig, ModelEntry, OperatorCredentialEntry, ProviderEntry};
pub use crypto::CryptoConfig;
pub use limits::RateLimitConfig;
pub use logging::LoggingConfig;
pub use resilience::ResilienceConfig;
pub use routing::{PolicyConfig, PowerLevelProfileConfig, PowerLevelsConfig};
