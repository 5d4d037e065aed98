//! Catalog adapters
//!
//! The registry publishes immutable snapshots behind an atomic pointer
//! swap; sources load snapshots from the external configuration surface.

/// Atomic snapshot registry with background refresh
pub mod registry;
/// Snapshot sources
pub mod source;

pub use registry::CatalogRegistry;
pub use source::{ConfigCatalogSource, StaticCatalogSource};
