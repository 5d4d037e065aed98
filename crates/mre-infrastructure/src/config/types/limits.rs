//! Caller-side rate limit configuration types

use crate::constants::{RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECS};
use serde::{Deserialize, Serialize};

/// Sliding-window rate limit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window length in seconds
    pub window_secs: u64,

    /// Requests admitted per (user, power level) per window
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: RATE_LIMIT_WINDOW_SECS,
            max_requests: RATE_LIMIT_MAX_REQUESTS,
        }
    }
}
