//! Routing Facade
//!
//! The single inbound entry point of the engine, invoked by the public
//! API layer after authentication: gate on the caller-side rate limit,
//! snapshot the catalog, filter and rank candidates, then hand the list
//! to the dispatcher.

use crate::domain_services::scoring::rank;
use crate::domain_services::selection::eligible_candidates;
use crate::use_cases::credentials::CredentialResolver;
use crate::use_cases::dispatch::{DispatchContext, Dispatcher};
use mre_domain::error::{Error, Result};
use mre_domain::ports::infrastructure::catalog::CatalogReader;
use mre_domain::ports::infrastructure::routing::{HealthTracker, RateLimiter};
use mre_domain::value_objects::power_level::PowerLevel;
use mre_domain::value_objects::request::{CompletionRequest, CompletionResponse};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

/// The engine facade
pub struct RoutingService {
    catalog: Arc<dyn CatalogReader>,
    resolver: CredentialResolver,
    rate_limiter: Arc<dyn RateLimiter>,
    health: Arc<dyn HealthTracker>,
    dispatcher: Dispatcher,
}

impl RoutingService {
    /// Assemble the facade from its collaborators
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        resolver: CredentialResolver,
        rate_limiter: Arc<dyn RateLimiter>,
        health: Arc<dyn HealthTracker>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            catalog,
            resolver,
            rate_limiter,
            health,
            dispatcher,
        }
    }

    /// Route and execute one completion request
    pub async fn route_and_dispatch(
        &self,
        user_id: &str,
        level: PowerLevel,
        conversation_id: Option<&str>,
        request: CompletionRequest,
    ) -> Result<CompletionResponse> {
        self.route_with_cancellation(
            user_id,
            level,
            conversation_id,
            request,
            CancellationToken::new(),
        )
        .await
    }

    /// Route and execute one completion request under a cancellation token
    ///
    /// The API layer cancels the token on client disconnect; an in-flight
    /// upstream attempt is aborted and remaining candidates are skipped.
    pub async fn route_with_cancellation(
        &self,
        user_id: &str,
        level: PowerLevel,
        conversation_id: Option<&str>,
        request: CompletionRequest,
        cancel: CancellationToken,
    ) -> Result<CompletionResponse> {
        if !self.rate_limiter.try_acquire(user_id, level) {
            warn!(user_id, level = %level, "caller rate limit exceeded");
            return Err(Error::rate_limited(format!(
                "Too many requests at power level '{}'",
                level
            )));
        }

        let request_id = Uuid::new_v4().to_string();
        let snapshot = self.catalog.snapshot();
        let profile = snapshot.profile(level);
        let available_types = self.resolver.available_types(user_id).await;

        let candidates = eligible_candidates(
            &snapshot,
            &profile,
            request.declared_input_tokens,
            &available_types,
            self.health.as_ref(),
        );
        if candidates.is_empty() {
            // Still routed through the dispatcher so the exhaustion is
            // metered like any other terminal failure.
            warn!(request_id, user_id, level = %level, "no eligible candidates");
        }

        let ranked = rank(candidates, &profile.weights, &snapshot.policy.fallback_order);
        if let Some(top) = ranked.first() {
            debug!(
                request_id,
                user_id,
                level = %level,
                candidates = ranked.len(),
                top = %top.provider.name,
                "candidates ranked"
            );
        }

        let ctx = DispatchContext {
            request_id: &request_id,
            user_id,
            conversation_id,
        };
        self.dispatcher
            .execute(&ctx, ranked, &self.resolver, &snapshot.policy, &request, &cancel)
            .await
    }
}
