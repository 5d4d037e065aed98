//! Usage Metering Value Objects
//!
//! One [`UsageRecord`] is appended per completed or terminally-failed
//! attempt sequence. Records are immutable after creation; billing and
//! reconciliation consume them downstream.

use crate::value_objects::credential::CredentialOrigin;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a failed upstream attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Attempt exceeded the per-call timeout
    Timeout,
    /// Upstream returned a rate-limit response
    RateLimited,
    /// Upstream returned a 5xx-equivalent server error
    ServerError,
    /// Upstream rejected the credential
    AuthRejected,
    /// Upstream rejected the request shape
    BadRequest,
}

impl ErrorClass {
    /// Whether a retry elsewhere (or later) is likely to succeed
    ///
    /// Transient classes open/extend a provider cooldown; permanent
    /// classes only disqualify the (provider, credential) pair for the
    /// request at hand.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorClass::Timeout | ErrorClass::RateLimited | ErrorClass::ServerError
        )
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::AuthRejected => "auth_rejected",
            Self::BadRequest => "bad_request",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal status of a routed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageStatus {
    /// A provider answered
    Success,
    /// All candidates exhausted or retry budget spent
    Failed,
    /// Caller abandoned the request mid-flight
    Cancelled,
}

/// Token counts reported by (or estimated for) one upstream call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed from the prompt
    pub input_tokens: u32,
    /// Tokens generated in the reply
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Create a token usage pair
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Total tokens across both directions
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Append-only record of one terminal routing outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Engine-assigned request id
    pub request_id: String,
    /// Caller attribution
    pub user_id: String,
    /// Provider that served (or last failed) the request; None when no
    /// candidate was ever attempted
    pub provider: Option<String>,
    /// Model the outcome is attributed to
    pub model: Option<String>,
    /// Who paid for the upstream call, when one was made
    pub paid_by: Option<CredentialOrigin>,
    /// Token counts for the attempt
    pub usage: TokenUsage,
    /// Computed cost in the operator's accounting currency
    pub cost: f64,
    /// End-to-end latency of the terminal attempt in milliseconds
    pub latency_ms: u64,
    /// Terminal status
    pub status: UsageStatus,
    /// Failure classification when status is not Success
    pub error_class: Option<ErrorClass>,
    /// Number of upstream attempts made for the request
    pub attempts: u32,
    /// Creation timestamp
    pub recorded_at: DateTime<Utc>,
}

impl UsageRecord {
    /// Record a successful attempt
    #[allow(clippy::too_many_arguments)]
    pub fn success(
        request_id: &str,
        user_id: &str,
        provider: &str,
        model: &str,
        paid_by: CredentialOrigin,
        usage: TokenUsage,
        cost: f64,
        latency_ms: u64,
        attempts: u32,
    ) -> Self {
        Self {
            request_id: request_id.to_string(),
            user_id: user_id.to_string(),
            provider: Some(provider.to_string()),
            model: Some(model.to_string()),
            paid_by: Some(paid_by),
            usage,
            cost,
            latency_ms,
            status: UsageStatus::Success,
            error_class: None,
            attempts,
            recorded_at: Utc::now(),
        }
    }

    /// Record a terminally-failed request
    pub fn failure(
        request_id: &str,
        user_id: &str,
        last_provider: Option<&str>,
        last_model: Option<&str>,
        error_class: Option<ErrorClass>,
        attempts: u32,
    ) -> Self {
        Self {
            request_id: request_id.to_string(),
            user_id: user_id.to_string(),
            provider: last_provider.map(str::to_string),
            model: last_model.map(str::to_string),
            paid_by: None,
            usage: TokenUsage::default(),
            cost: 0.0,
            latency_ms: 0,
            status: UsageStatus::Failed,
            error_class,
            attempts,
            recorded_at: Utc::now(),
        }
    }

    /// Record a caller-cancelled request with an attempt in flight
    ///
    /// Upstream may already have billed partial generation, so the record
    /// carries the provider/model pair for reconciliation.
    pub fn cancelled(
        request_id: &str,
        user_id: &str,
        provider: &str,
        model: &str,
        attempts: u32,
    ) -> Self {
        Self {
            request_id: request_id.to_string(),
            user_id: user_id.to_string(),
            provider: Some(provider.to_string()),
            model: Some(model.to_string()),
            paid_by: None,
            usage: TokenUsage::default(),
            cost: 0.0,
            latency_ms: 0,
            status: UsageStatus::Cancelled,
            error_class: None,
            attempts,
            recorded_at: Utc::now(),
        }
    }
}
