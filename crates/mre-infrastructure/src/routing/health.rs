//! Health Tracking for Provider Routing
//!
//! Per-provider records in a concurrent map. Transient failures open an
//! exponential cooldown (base delay doubled per consecutive failure,
//! capped); a success while degraded resets the record immediately
//! without waiting for the cooldown to lapse. A bounded window of recent
//! outcomes yields the error rate and the rate-limit proximity estimate
//! consumed by the scorer.

use crate::constants::{
    COOLDOWN_BASE_DELAY_MS, COOLDOWN_MAX_DELAY_SECS, HEALTH_DEGRADED_THRESHOLD,
    HEALTH_OUTCOME_WINDOW, RATE_PRESSURE_SCALE,
};
use dashmap::DashMap;
use mre_domain::ports::infrastructure::routing::{
    HealthSnapshot, HealthTracker, ProviderHealthStatus,
};
use mre_domain::value_objects::usage::ErrorClass;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Outcome kept in the per-provider sliding window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Transient,
    RateLimited,
}

/// Health data for a single provider
#[derive(Debug)]
struct ProviderHealthData {
    /// Consecutive transient failures since the last success
    consecutive_failures: u32,
    /// Open cooldown expiry, if any
    cooldown_until: Option<Instant>,
    /// Last observed call latency
    last_latency_ms: Option<u64>,
    /// Recent outcomes, newest at the back
    outcomes: VecDeque<Outcome>,
}

impl Default for ProviderHealthData {
    fn default() -> Self {
        Self {
            consecutive_failures: 0,
            cooldown_until: None,
            last_latency_ms: None,
            outcomes: VecDeque::with_capacity(HEALTH_OUTCOME_WINDOW),
        }
    }
}

/// In-memory health tracker with exponential cooldowns
///
/// Records are created lazily on first observation and expire naturally
/// as cooldowns lapse; nothing is explicitly deleted.
pub struct CooldownHealthTracker {
    /// Health data per provider
    records: DashMap<String, ProviderHealthData>,
    /// Base cooldown delay, doubled per consecutive failure
    base_delay: Duration,
    /// Cap on the computed cooldown delay
    max_delay: Duration,
    /// Consecutive failures before a provider reads as degraded
    degraded_threshold: u32,
    /// Outcome window length
    window: usize,
}

impl CooldownHealthTracker {
    /// Create a tracker with the default backoff settings
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            base_delay: Duration::from_millis(COOLDOWN_BASE_DELAY_MS),
            max_delay: Duration::from_secs(COOLDOWN_MAX_DELAY_SECS),
            degraded_threshold: HEALTH_DEGRADED_THRESHOLD,
            window: HEALTH_OUTCOME_WINDOW,
        }
    }

    /// Create a tracker with custom backoff settings
    pub fn with_backoff(base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            base_delay,
            max_delay,
            ..Self::new()
        }
    }

    /// Cooldown delay for the n-th consecutive failure
    fn cooldown_delay(&self, consecutive_failures: u32) -> Duration {
        // Exponent is clamped; max_delay caps the result anyway.
        let exponent = consecutive_failures.saturating_sub(1).min(16);
        let delay = self.base_delay * (1u32 << exponent);
        delay.min(self.max_delay)
    }

    fn push_outcome(&self, data: &mut ProviderHealthData, outcome: Outcome) {
        if data.outcomes.len() == self.window {
            data.outcomes.pop_front();
        }
        data.outcomes.push_back(outcome);
    }

    fn view(&self, data: &ProviderHealthData, now: Instant) -> HealthSnapshot {
        let len = data.outcomes.len();
        let (mut failures, mut rate_limited) = (0usize, 0usize);
        for outcome in &data.outcomes {
            match outcome {
                Outcome::Success => {}
                Outcome::Transient => failures += 1,
                Outcome::RateLimited => {
                    failures += 1;
                    rate_limited += 1;
                }
            }
        }
        let error_rate = if len == 0 {
            0.0
        } else {
            failures as f64 / len as f64
        };
        let rate_limit_utilization = if len == 0 {
            0.0
        } else {
            (rate_limited as f64 / len as f64 * RATE_PRESSURE_SCALE).min(1.0)
        };

        let in_cooldown = data.cooldown_until.is_some_and(|until| until > now);
        let status = if len == 0 {
            ProviderHealthStatus::Unknown
        } else if in_cooldown || data.consecutive_failures >= self.degraded_threshold {
            ProviderHealthStatus::Degraded
        } else {
            ProviderHealthStatus::Healthy
        };

        HealthSnapshot {
            status,
            consecutive_failures: data.consecutive_failures,
            cooldown_until: data.cooldown_until.filter(|until| *until > now),
            error_rate,
            rate_limit_utilization,
            last_latency_ms: data.last_latency_ms,
        }
    }
}

impl Default for CooldownHealthTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthTracker for CooldownHealthTracker {
    fn record_success(&self, provider: &str, latency_ms: u64) {
        let mut data = self.records.entry(provider.to_string()).or_default();
        if data.consecutive_failures > 0 || data.cooldown_until.is_some() {
            info!(provider, "provider recovered; cooldown cleared");
        }
        data.consecutive_failures = 0;
        data.cooldown_until = None;
        data.last_latency_ms = Some(latency_ms);
        self.push_outcome(&mut data, Outcome::Success);
    }

    fn record_failure(&self, provider: &str, class: ErrorClass) {
        if !class.is_transient() {
            // Auth/malformed-request rejections say nothing about the
            // provider itself; only the credential pair is disqualified,
            // and that happens request-locally in the dispatcher.
            debug!(provider, class = %class, "permanent failure; no cooldown opened");
            return;
        }

        let mut data = self.records.entry(provider.to_string()).or_default();
        data.consecutive_failures += 1;
        let delay = self.cooldown_delay(data.consecutive_failures);
        data.cooldown_until = Some(Instant::now() + delay);
        let outcome = if class == ErrorClass::RateLimited {
            Outcome::RateLimited
        } else {
            Outcome::Transient
        };
        self.push_outcome(&mut data, outcome);
        warn!(
            provider,
            class = %class,
            consecutive_failures = data.consecutive_failures,
            cooldown_ms = delay.as_millis() as u64,
            "transient failure; cooldown extended"
        );
    }

    fn snapshot(&self, provider: &str) -> HealthSnapshot {
        let now = Instant::now();
        self.records
            .get(provider)
            .map(|data| self.view(&data, now))
            .unwrap_or_default()
    }

    fn in_cooldown(&self, provider: &str) -> bool {
        let now = Instant::now();
        self.records
            .get(provider)
            .and_then(|data| data.cooldown_until)
            .is_some_and(|until| until > now)
    }

    fn all_statuses(&self) -> HashMap<String, ProviderHealthStatus> {
        let now = Instant::now();
        self.records
            .iter()
            .map(|entry| (entry.key().clone(), self.view(entry.value(), now).status))
            .collect()
    }
}
