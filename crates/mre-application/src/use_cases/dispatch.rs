//! Dispatch State Machine
//!
//! Walks the ranked candidate list in order, resolving credentials,
//! applying per-attempt and wall-clock timeouts, classifying failures,
//! feeding the health tracker, and emitting exactly one usage record per
//! terminal outcome. Candidates are tried strictly sequentially: cost is
//! only attributed to the provider actually used.

use crate::domain_services::scoring::ScoredCandidate;
use crate::use_cases::credentials::CredentialResolver;
use mre_domain::error::{Error, Result};
use mre_domain::ports::infrastructure::routing::{HealthTracker, SessionAffinity};
use mre_domain::ports::infrastructure::usage::UsageSink;
use mre_domain::ports::providers::upstream::UpstreamClient;
use mre_domain::value_objects::policy::RoutingPolicy;
use mre_domain::value_objects::request::{CompletionRequest, CompletionResponse};
use mre_domain::value_objects::usage::{ErrorClass, UsageRecord};
use std::sync::Arc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Upper bound on a usage sink append; the response path never waits
/// longer than this for metering.
const SINK_APPEND_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(2);

/// Per-request attribution threaded through the dispatch walk
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<'a> {
    /// Engine-assigned request id
    pub request_id: &'a str,
    /// Caller attribution
    pub user_id: &'a str,
    /// Conversation id for sticky sessions, if the caller supplied one
    pub conversation_id: Option<&'a str>,
}

/// Executes ranked candidates against the upstream port
pub struct Dispatcher {
    upstream: Arc<dyn UpstreamClient>,
    health: Arc<dyn HealthTracker>,
    affinity: Arc<dyn SessionAffinity>,
    usage: Arc<dyn UsageSink>,
}

impl Dispatcher {
    /// Create a dispatcher over the injected collaborators
    pub fn new(
        upstream: Arc<dyn UpstreamClient>,
        health: Arc<dyn HealthTracker>,
        affinity: Arc<dyn SessionAffinity>,
        usage: Arc<dyn UsageSink>,
    ) -> Self {
        Self {
            upstream,
            health,
            affinity,
            usage,
        }
    }

    /// Walk the ranked candidates until a response or exhaustion
    ///
    /// Consumes at most `policy.max_retries + 1` transient attempts; a
    /// candidate skipped for lack of a credential costs nothing, and a
    /// permanent failure advances immediately without touching the retry
    /// budget. The whole walk is bounded by `policy.total_timeout` and by
    /// the caller's cancellation token.
    pub async fn execute(
        &self,
        ctx: &DispatchContext<'_>,
        ranked: Vec<ScoredCandidate>,
        resolver: &CredentialResolver,
        policy: &RoutingPolicy,
        request: &CompletionRequest,
        cancel: &CancellationToken,
    ) -> Result<CompletionResponse> {
        let ordered = self.apply_affinity(ctx.conversation_id, ranked);
        let budget = policy.attempt_budget();
        let started = Instant::now();

        let mut budget_spent = 0u32;
        let mut attempts_made = 0u32;
        let mut last_failure: Option<(String, String, ErrorClass)> = None;

        for candidate in ordered {
            if budget_spent >= budget {
                break;
            }
            let Some(remaining) = policy.total_timeout.checked_sub(started.elapsed()) else {
                warn!(
                    request_id = ctx.request_id,
                    "wall-clock budget exhausted before next attempt"
                );
                break;
            };

            let provider_name = candidate.provider.name.clone();
            let credential = match resolver.resolve(ctx.user_id, &candidate.provider).await {
                Ok(Some(credential)) => credential,
                Ok(None) => {
                    debug!(
                        request_id = ctx.request_id,
                        provider = %provider_name,
                        "no usable credential; skipping candidate"
                    );
                    continue;
                }
                Err(err) => {
                    warn!(
                        request_id = ctx.request_id,
                        provider = %provider_name,
                        error = %err,
                        "credential resolution failed; skipping candidate"
                    );
                    continue;
                }
            };

            attempts_made += 1;
            let attempt_timeout = policy.request_timeout.min(remaining);
            debug!(
                request_id = ctx.request_id,
                provider = %provider_name,
                model = %candidate.model.id,
                attempt = attempts_made,
                "dispatching attempt"
            );

            let outcome = tokio::select! {
                () = cancel.cancelled() => {
                    self.emit(UsageRecord::cancelled(
                        ctx.request_id,
                        ctx.user_id,
                        &provider_name,
                        &candidate.model.id,
                        attempts_made,
                    ))
                    .await;
                    return Err(Error::Cancelled);
                }
                res = tokio::time::timeout(
                    attempt_timeout,
                    self.upstream.complete(
                        &candidate.provider,
                        &candidate.model,
                        &credential,
                        request,
                        attempt_timeout,
                    ),
                ) => res.unwrap_or_else(|_| {
                    Err(Error::upstream(
                        &provider_name,
                        ErrorClass::Timeout,
                        format!("attempt timed out after {:?}", attempt_timeout),
                    ))
                }),
            };

            match outcome {
                Ok(response) => {
                    self.health
                        .record_success(&provider_name, response.latency_ms);
                    if let Some(conversation_id) = ctx.conversation_id {
                        self.affinity.bind(conversation_id, &provider_name);
                    }
                    let cost = candidate
                        .model
                        .estimate_cost(response.usage.input_tokens, response.usage.output_tokens);
                    self.emit(UsageRecord::success(
                        ctx.request_id,
                        ctx.user_id,
                        &provider_name,
                        &candidate.model.id,
                        credential.origin,
                        response.usage,
                        cost,
                        response.latency_ms,
                        attempts_made,
                    ))
                    .await;
                    info!(
                        request_id = ctx.request_id,
                        provider = %provider_name,
                        model = %candidate.model.id,
                        attempts = attempts_made,
                        latency_ms = response.latency_ms,
                        "request served"
                    );
                    return Ok(CompletionResponse {
                        content: response.content,
                        provider: provider_name,
                        model: candidate.model.id,
                        usage: response.usage,
                        latency_ms: response.latency_ms,
                        attempts: attempts_made,
                    });
                }
                Err(err) => {
                    let class = err.upstream_class().unwrap_or(ErrorClass::ServerError);
                    self.health.record_failure(&provider_name, class);
                    last_failure =
                        Some((provider_name.clone(), candidate.model.id.clone(), class));

                    if class.is_transient() {
                        budget_spent += 1;
                        warn!(
                            request_id = ctx.request_id,
                            provider = %provider_name,
                            class = %class,
                            error = %err,
                            "transient failure; advancing to next candidate"
                        );
                        if budget_spent < budget {
                            // Linear backoff between fallback attempts.
                            let delay = policy.retry_delay * budget_spent;
                            tokio::select! {
                                () = cancel.cancelled() => return Err(Error::Cancelled),
                                () = tokio::time::sleep(delay) => {}
                            }
                        }
                    } else {
                        warn!(
                            request_id = ctx.request_id,
                            provider = %provider_name,
                            class = %class,
                            error = %err,
                            "permanent failure; candidate disqualified for this request"
                        );
                    }
                }
            }
        }

        let (last_provider, last_model, last_class) = match &last_failure {
            Some((provider, model, class)) => {
                (Some(provider.as_str()), Some(model.as_str()), Some(*class))
            }
            None => (None, None, None),
        };
        self.emit(UsageRecord::failure(
            ctx.request_id,
            ctx.user_id,
            last_provider,
            last_model,
            last_class,
            attempts_made,
        ))
        .await;
        warn!(
            request_id = ctx.request_id,
            attempts = attempts_made,
            "candidates exhausted"
        );
        Err(Error::service_unavailable(attempts_made))
    }

    /// Move a healthy sticky-bound provider's best candidate to the front
    fn apply_affinity(
        &self,
        conversation_id: Option<&str>,
        ranked: Vec<ScoredCandidate>,
    ) -> Vec<ScoredCandidate> {
        let Some(conversation_id) = conversation_id else {
            return ranked;
        };
        let Some(bound) = self.affinity.bound_provider(conversation_id) else {
            return ranked;
        };
        if self.health.in_cooldown(&bound) {
            debug!(
                conversation_id,
                provider = %bound,
                "sticky provider in cooldown; using normal ranking"
            );
            return ranked;
        }
        let Some(position) = ranked.iter().position(|c| c.provider.name == bound) else {
            return ranked;
        };
        let mut ranked = ranked;
        let sticky = ranked.remove(position);
        debug!(
            conversation_id,
            provider = %sticky.provider.name,
            "sticky session hit; provider tried first"
        );
        ranked.insert(0, sticky);
        ranked
    }

    /// Append a usage record without ever failing the response path
    async fn emit(&self, record: UsageRecord) {
        match tokio::time::timeout(SINK_APPEND_TIMEOUT, self.usage.append(record)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                warn!(error = %err, "usage sink rejected record; metering loss");
            }
            Err(_) => {
                warn!("usage sink append timed out; metering loss");
            }
        }
    }
}
