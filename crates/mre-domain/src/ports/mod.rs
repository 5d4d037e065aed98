//! Domain Ports
//!
//! Contracts for everything the engine reaches outside itself for.
//! The traits are defined here; implementations live in
//! `mre-infrastructure` and are injected at bootstrap.

/// Infrastructure collaborator ports (catalog, credentials, usage, routing state)
pub mod infrastructure;
/// Provider-capability ports (crypto, upstream execution)
pub mod providers;

pub use infrastructure::catalog::{CatalogReader, CatalogSnapshot, CatalogSource};
pub use infrastructure::credentials::CredentialStore;
pub use infrastructure::routing::{
    HealthSnapshot, HealthTracker, ProviderHealthStatus, RateLimiter, SessionAffinity,
};
pub use infrastructure::usage::UsageSink;
pub use providers::crypto::{CryptoProvider, EncryptedData};
pub use providers::upstream::{UpstreamClient, UpstreamResponse};
