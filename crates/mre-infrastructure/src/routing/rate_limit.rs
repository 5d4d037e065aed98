//! Caller-Side Rate Limiting
//!
//! Sliding-window counter per (user, power level), checked before any
//! candidate is attempted. Window keys are independent; no cross-key
//! locking.

use crate::constants::{RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECS};
use dashmap::DashMap;
use mre_domain::ports::infrastructure::routing::RateLimiter;
use mre_domain::value_objects::power_level::PowerLevel;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Sliding-window rate limiter keyed by (user, power level)
pub struct SlidingWindowRateLimiter {
    windows: DashMap<String, VecDeque<Instant>>,
    window: Duration,
    max_requests: usize,
}

impl SlidingWindowRateLimiter {
    /// Create a limiter with the default window and capacity
    pub fn new() -> Self {
        Self::with_settings(
            Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
            RATE_LIMIT_MAX_REQUESTS as usize,
        )
    }

    /// Create a limiter with a custom window and capacity
    pub fn with_settings(window: Duration, max_requests: usize) -> Self {
        Self {
            windows: DashMap::new(),
            window,
            max_requests,
        }
    }
}

impl Default for SlidingWindowRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter for SlidingWindowRateLimiter {
    fn try_acquire(&self, user_id: &str, level: PowerLevel) -> bool {
        let key = format!("{}:{}", user_id, level);
        let now = Instant::now();
        let mut window = self.windows.entry(key).or_default();

        while window
            .front()
            .is_some_and(|t| now.duration_since(*t) >= self.window)
        {
            window.pop_front();
        }

        if window.len() < self.max_requests {
            window.push_back(now);
            true
        } else {
            false
        }
    }
}

/// Null rate limiter for testing
///
/// Admits every request without tracking anything.
pub struct NullRateLimiter;

impl RateLimiter for NullRateLimiter {
    fn try_acquire(&self, _user_id: &str, _level: PowerLevel) -> bool {
        true
    }
}
