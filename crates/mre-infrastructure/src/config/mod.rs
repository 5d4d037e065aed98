//! Configuration
//!
//! TOML + environment configuration with defaults, merged via Figment
//! and validated before the engine starts.

/// Configuration loading and validation
pub mod loader;
/// Typed configuration sections
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::app::AppConfig;
pub use types::logging::LoggingConfig;
