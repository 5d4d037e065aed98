//! Catalog Snapshot Registry
//!
//! Holds the currently published [`CatalogSnapshot`] behind an
//! `ArcSwap`: readers get a consistent snapshot with a single atomic
//! load, the refresher swaps in a whole new snapshot so nobody observes
//! a half-updated catalog. A failed refresh keeps the previous snapshot;
//! staleness is bounded by the refresh interval.

use arc_swap::ArcSwap;
use mre_domain::error::Result;
use mre_domain::ports::infrastructure::catalog::{CatalogReader, CatalogSnapshot, CatalogSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Registry owning the published catalog snapshot
pub struct CatalogRegistry {
    current: ArcSwap<CatalogSnapshot>,
    source: Arc<dyn CatalogSource>,
}

impl CatalogRegistry {
    /// Load the initial snapshot and build the registry
    ///
    /// Fails when the very first load or its validation fails; the
    /// engine refuses to start on an unusable catalog.
    pub async fn load(source: Arc<dyn CatalogSource>) -> Result<Self> {
        let snapshot = source.load().await?;
        snapshot.validate()?;
        info!(
            providers = snapshot.providers.len(),
            models = snapshot.models.len(),
            "catalog loaded"
        );
        Ok(Self {
            current: ArcSwap::from_pointee(snapshot),
            source,
        })
    }

    /// Load a fresh snapshot and swap it in atomically
    ///
    /// On failure the previous snapshot stays published and the error is
    /// surfaced for the caller/refresher to log.
    pub async fn refresh(&self) -> Result<()> {
        let snapshot = match self.source.load().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "catalog refresh failed; keeping previous snapshot");
                return Err(err);
            }
        };
        if let Err(err) = snapshot.validate() {
            warn!(error = %err, "refreshed catalog rejected; keeping previous snapshot");
            return Err(err);
        }
        info!(
            providers = snapshot.providers.len(),
            models = snapshot.models.len(),
            "catalog snapshot refreshed"
        );
        self.current.store(Arc::new(snapshot));
        Ok(())
    }

    /// Spawn the background refresher task
    ///
    /// Reloads on the given interval until the shutdown token fires.
    pub fn spawn_refresher(
        self: &Arc<Self>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; the initial load
            // already happened, so consume it.
            ticker.tick().await;
            loop {
                tokio::select! {
                    () = shutdown.cancelled() => {
                        debug!("catalog refresher stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        let _ = registry.refresh().await;
                    }
                }
            }
        })
    }
}

impl CatalogReader for CatalogRegistry {
    fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.load_full()
    }
}
