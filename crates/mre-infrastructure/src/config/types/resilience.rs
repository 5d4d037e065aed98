//! Resilience configuration types

use crate::constants::{
    COOLDOWN_BASE_DELAY_MS, COOLDOWN_MAX_DELAY_SECS, STICKY_MAX_SESSIONS, STICKY_TTL_SECS,
};
use serde::{Deserialize, Serialize};

/// Resilience configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResilienceConfig {
    /// Base cooldown delay in milliseconds (doubled per consecutive failure)
    pub cooldown_base_delay_ms: u64,

    /// Cap on the computed cooldown delay in seconds
    pub cooldown_max_delay_secs: u64,

    /// Conversation binding time-to-live in seconds
    pub sticky_ttl_secs: u64,

    /// Maximum number of live conversation bindings
    pub sticky_max_sessions: u64,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            cooldown_base_delay_ms: COOLDOWN_BASE_DELAY_MS,
            cooldown_max_delay_secs: COOLDOWN_MAX_DELAY_SECS,
            sticky_ttl_secs: STICKY_TTL_SECS,
            sticky_max_sessions: STICKY_MAX_SESSIONS,
        }
    }
}
