//! Shared Routing State Ports
//!
//! Contracts for the mutable state shared across concurrent requests:
//! provider health, conversation stickiness, and the caller-side rate
//! limit. All reads are non-blocking; updates are per-key atomic with
//! relaxed cross-writer consistency (an approximate health signal, not a
//! correctness-critical counter).

use crate::value_objects::power_level::PowerLevel;
use crate::value_objects::usage::ErrorClass;
use std::collections::HashMap;
use std::time::Instant;

/// Live health status derived from recent outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderHealthStatus {
    /// Provider is functioning normally
    Healthy,
    /// Provider is in cooldown or accumulating failures
    Degraded,
    /// No outcome observed yet
    #[default]
    Unknown,
}

/// Point-in-time view of one provider's health record
#[derive(Debug, Clone, Copy)]
pub struct HealthSnapshot {
    /// Derived status
    pub status: ProviderHealthStatus,
    /// Consecutive transient failures since the last success
    pub consecutive_failures: u32,
    /// When the current cooldown lapses, if one is open
    pub cooldown_until: Option<Instant>,
    /// Fraction of recent outcomes that were transient failures, in [0, 1]
    pub error_rate: f64,
    /// Estimated proximity to the provider's rate limit, in [0, 1]
    pub rate_limit_utilization: f64,
    /// Last observed call latency in milliseconds
    pub last_latency_ms: Option<u64>,
}

impl Default for HealthSnapshot {
    fn default() -> Self {
        Self {
            status: ProviderHealthStatus::Unknown,
            consecutive_failures: 0,
            cooldown_until: None,
            error_rate: 0.0,
            rate_limit_utilization: 0.0,
            last_latency_ms: None,
        }
    }
}

/// Per-provider health bookkeeping
///
/// Records are created lazily on first observation and expire naturally
/// as cooldowns lapse. Lost updates between racing writers are accepted.
pub trait HealthTracker: Send + Sync {
    /// Record a successful call; resets the failure counter and clears
    /// any open cooldown immediately
    fn record_success(&self, provider: &str, latency_ms: u64);

    /// Record a failed call
    ///
    /// Transient classes increment the failure counter and open/extend an
    /// exponential cooldown; permanent classes leave the cooldown state
    /// untouched (the provider itself may be fine).
    fn record_failure(&self, provider: &str, class: ErrorClass);

    /// Point-in-time view of a provider's record
    fn snapshot(&self, provider: &str) -> HealthSnapshot;

    /// Whether the provider is inside an active cooldown window
    fn in_cooldown(&self, provider: &str) -> bool;

    /// Status of every provider observed so far
    fn all_statuses(&self) -> HashMap<String, ProviderHealthStatus>;
}

/// Conversation→provider affinity for multi-turn continuity
///
/// Bindings live in a bounded-TTL cache keyed by conversation id; an
/// evicted or expired binding silently falls back to normal ranking.
pub trait SessionAffinity: Send + Sync {
    /// Provider currently bound to a conversation, if any
    fn bound_provider(&self, conversation_id: &str) -> Option<String>;

    /// Bind (or rebind) a conversation to the provider that served it
    fn bind(&self, conversation_id: &str, provider: &str);

    /// Drop a conversation's binding
    fn forget(&self, conversation_id: &str);
}

/// Caller-side sliding-window rate limit, gating dispatch entry
pub trait RateLimiter: Send + Sync {
    /// Try to admit one request for (user, power level); `false` means
    /// the caller must be rejected before any candidate is attempted
    fn try_acquire(&self, user_id: &str, level: PowerLevel) -> bool;
}
