//! Engine Bootstrap
//!
//! Assembles the routing engine from the loaded configuration and the
//! externally-owned collaborators (credential store, upstream client,
//! usage sink). The adapter set is fixed, so plain construction replaces
//! a DI container.

use crate::catalog::registry::CatalogRegistry;
use crate::catalog::source::ConfigCatalogSource;
use crate::config::types::app::AppConfig;
use crate::crypto::CryptoService;
use crate::routing::health::CooldownHealthTracker;
use crate::routing::rate_limit::SlidingWindowRateLimiter;
use crate::routing::sticky::MokaSessionAffinity;
use crate::upstream::http::HttpUpstreamClient;
use crate::usage::sink::TracingUsageSink;
use mre_application::use_cases::credentials::CredentialResolver;
use mre_application::use_cases::dispatch::Dispatcher;
use mre_application::use_cases::routing_service::RoutingService;
use mre_domain::error::Result;
use mre_domain::ports::infrastructure::catalog::CatalogReader;
use mre_domain::ports::infrastructure::credentials::CredentialStore;
use mre_domain::ports::infrastructure::routing::{HealthTracker, RateLimiter, SessionAffinity};
use mre_domain::ports::infrastructure::usage::UsageSink;
use mre_domain::ports::providers::crypto::CryptoProvider;
use mre_domain::ports::providers::upstream::UpstreamClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// A fully wired engine plus its background machinery
pub struct Engine {
    /// The routing facade handed to the API layer
    pub service: Arc<RoutingService>,
    /// The snapshot registry, exposed for admin introspection
    pub catalog: Arc<CatalogRegistry>,
    shutdown: CancellationToken,
    refresher: JoinHandle<()>,
}

impl Engine {
    /// Stop the background refresher and release the engine
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        let _ = self.refresher.await;
    }
}

/// Wire an engine from configuration and injected collaborators
pub async fn build_engine(
    config: &AppConfig,
    credential_store: Arc<dyn CredentialStore>,
    upstream: Arc<dyn UpstreamClient>,
    usage_sink: Arc<dyn UsageSink>,
) -> Result<Engine> {
    let crypto: Arc<dyn CryptoProvider> = match &config.crypto.master_key_b64 {
        Some(key_b64) => Arc::new(CryptoService::from_base64_key(key_b64)?),
        None => {
            warn!(
                "no master key configured; generating an ephemeral key \
                 (previously stored ciphertext will not decrypt)"
            );
            Arc::new(CryptoService::new(CryptoService::generate_master_key())?)
        }
    };

    let source = Arc::new(ConfigCatalogSource::from_config(config));
    let catalog = Arc::new(CatalogRegistry::load(source).await?);
    let shutdown = CancellationToken::new();
    let refresher = catalog.spawn_refresher(
        Duration::from_secs(config.catalog.refresh_interval_secs),
        shutdown.clone(),
    );

    let health: Arc<dyn HealthTracker> = Arc::new(CooldownHealthTracker::with_backoff(
        Duration::from_millis(config.resilience.cooldown_base_delay_ms),
        Duration::from_secs(config.resilience.cooldown_max_delay_secs),
    ));
    let affinity: Arc<dyn SessionAffinity> = Arc::new(MokaSessionAffinity::with_settings(
        Duration::from_secs(config.resilience.sticky_ttl_secs),
        config.resilience.sticky_max_sessions,
    ));
    let rate_limiter: Arc<dyn RateLimiter> = Arc::new(SlidingWindowRateLimiter::with_settings(
        Duration::from_secs(config.limits.window_secs),
        config.limits.max_requests as usize,
    ));

    let resolver = CredentialResolver::new(credential_store, crypto);
    let dispatcher = Dispatcher::new(upstream, Arc::clone(&health), affinity, usage_sink);
    let reader: Arc<dyn CatalogReader> = Arc::clone(&catalog) as Arc<dyn CatalogReader>;
    let service = Arc::new(RoutingService::new(
        reader,
        resolver,
        rate_limiter,
        health,
        dispatcher,
    ));

    Ok(Engine {
        service,
        catalog,
        shutdown,
        refresher,
    })
}

/// Wire an engine with the shipped HTTP client and tracing usage sink
pub async fn build_engine_with_defaults(
    config: &AppConfig,
    credential_store: Arc<dyn CredentialStore>,
) -> Result<Engine> {
    let upstream = Arc::new(HttpUpstreamClient::new()?);
    let usage_sink = Arc::new(TracingUsageSink::new());
    build_engine(config, credential_store, upstream, usage_sink).await
}
