//! Upstream Execution Port
//!
//! One attempt against one (provider, model) pair. The implementation
//! speaks the provider's API dialect; the dispatcher owns retries,
//! fallback and health bookkeeping on top of this contract.

use crate::error::Result;
use crate::value_objects::credential::ResolvedCredential;
use crate::value_objects::model::ModelSpec;
use crate::value_objects::provider::Provider;
use crate::value_objects::request::CompletionRequest;
use crate::value_objects::usage::TokenUsage;
use async_trait::async_trait;
use std::time::Duration;

/// Raw outcome of one successful upstream call
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Generated content
    pub content: String,
    /// Token counts reported by the provider (zeroes when unreported)
    pub usage: TokenUsage,
    /// Observed call latency in milliseconds
    pub latency_ms: u64,
}

/// Upstream completion client port
///
/// Failures must surface as `Error::Upstream` with an [`crate::value_objects::usage::ErrorClass`]
/// classification; the dispatcher never inspects transport errors directly.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Execute a single completion attempt against one provider/model pair
    async fn complete(
        &self,
        provider: &Provider,
        model: &ModelSpec,
        credential: &ResolvedCredential,
        request: &CompletionRequest,
        timeout: Duration,
    ) -> Result<UpstreamResponse>;
}
