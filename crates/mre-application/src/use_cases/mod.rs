//! Use Cases
//!
//! The asynchronous orchestration layer: credential resolution, the
//! dispatch state machine, and the routing facade.

/// BYOK/operator credential resolution
pub mod credentials;
/// Ranked-candidate execution with retry and fallback
pub mod dispatch;
/// The `route_and_dispatch` facade
pub mod routing_service;

pub use credentials::CredentialResolver;
pub use dispatch::{DispatchContext, Dispatcher};
pub use routing_service::RoutingService;
