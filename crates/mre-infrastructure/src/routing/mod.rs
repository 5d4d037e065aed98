//! Shared routing state adapters
//!
//! Concurrent implementations of the health, stickiness and rate-limit
//! ports. All three are designed for high-read/low-write contention:
//! reads never block, writes are per-key atomic, and relaxed cross-writer
//! consistency is accepted.

/// Cooldown-based provider health tracking
pub mod health;
/// Caller-side sliding-window rate limiting
pub mod rate_limit;
/// Conversation stickiness
pub mod sticky;

pub use health::CooldownHealthTracker;
pub use rate_limit::{NullRateLimiter, SlidingWindowRateLimiter};
pub use sticky::MokaSessionAffinity;
