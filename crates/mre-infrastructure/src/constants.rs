//! Infrastructure layer constants
//!
//! Constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `mre_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "mre.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "mre";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "MRE";

// ============================================================================
// CRYPTO CONSTANTS
// ============================================================================

/// AES-GCM key size in bytes
pub const AES_GCM_KEY_SIZE: usize = 32;

/// AES-GCM nonce size in bytes
pub const AES_GCM_NONCE_SIZE: usize = 12;

// ============================================================================
// HEALTH TRACKING CONSTANTS
// ============================================================================

/// Base cooldown delay in milliseconds (doubled per consecutive failure)
pub const COOLDOWN_BASE_DELAY_MS: u64 = 1000;

/// Maximum cooldown delay in seconds
pub const COOLDOWN_MAX_DELAY_SECS: u64 = 300;

/// Consecutive failures before a provider reads as degraded
pub const HEALTH_DEGRADED_THRESHOLD: u32 = 2;

/// Number of recent outcomes kept per provider for the error-rate window
pub const HEALTH_OUTCOME_WINDOW: usize = 32;

/// Scale applied to the rate-limited fraction of the outcome window when
/// estimating rate-limit proximity
pub const RATE_PRESSURE_SCALE: f64 = 4.0;

// ============================================================================
// RATE LIMIT CONSTANTS
// ============================================================================

/// Default sliding-window length in seconds
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Default number of requests admitted per window
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 60;

// ============================================================================
// STICKY SESSION CONSTANTS
// ============================================================================

/// Conversation binding time-to-live in seconds
pub const STICKY_TTL_SECS: u64 = 1800;

/// Maximum number of live conversation bindings
pub const STICKY_MAX_SESSIONS: u64 = 100_000;

// ============================================================================
// CATALOG CONSTANTS
// ============================================================================

/// Default catalog refresh interval in seconds
pub const CATALOG_REFRESH_INTERVAL_SECS: u64 = 300;

// ============================================================================
// HTTP CLIENT POOL CONSTANTS
// ============================================================================

/// HTTP client connect timeout in seconds
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP client idle timeout in seconds
pub const HTTP_CLIENT_IDLE_TIMEOUT_SECS: u64 = 90;

/// Maximum idle connections per host in the HTTP client pool
pub const HTTP_MAX_IDLE_PER_HOST: usize = 10;

/// Anthropic API version header value
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
