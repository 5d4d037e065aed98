//! Conversation Stickiness
//!
//! Bounded-TTL cache mapping conversation ids to the provider that last
//! served them. Expired or evicted bindings silently fall back to normal
//! ranking.

use crate::constants::{STICKY_MAX_SESSIONS, STICKY_TTL_SECS};
use moka::sync::Cache;
use mre_domain::ports::infrastructure::routing::SessionAffinity;
use std::time::Duration;

/// Moka-backed session affinity cache
pub struct MokaSessionAffinity {
    bindings: Cache<String, String>,
}

impl MokaSessionAffinity {
    /// Create a cache with the default TTL and capacity
    pub fn new() -> Self {
        Self::with_settings(
            Duration::from_secs(STICKY_TTL_SECS),
            STICKY_MAX_SESSIONS,
        )
    }

    /// Create a cache with a custom TTL and capacity
    pub fn with_settings(ttl: Duration, max_sessions: u64) -> Self {
        Self {
            bindings: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(max_sessions)
                .build(),
        }
    }
}

impl Default for MokaSessionAffinity {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionAffinity for MokaSessionAffinity {
    fn bound_provider(&self, conversation_id: &str) -> Option<String> {
        self.bindings.get(conversation_id)
    }

    fn bind(&self, conversation_id: &str, provider: &str) {
        self.bindings
            .insert(conversation_id.to_string(), provider.to_string());
    }

    fn forget(&self, conversation_id: &str) {
        self.bindings.invalidate(conversation_id);
    }
}
