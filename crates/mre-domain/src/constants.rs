//! Domain layer constants
//!
//! Constants that are part of the routing logic itself and are consumed by
//! the application layer. Infrastructure-specific constants remain in
//! `mre_infrastructure::constants`.

// ============================================================================
// SCORING CONSTANTS
// ============================================================================

/// Tolerance when checking that routing weights sum to 1.0
pub const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Fraction of the composite score removed per unit of recent error rate
pub const ERROR_RATE_PENALTY_FACTOR: f64 = 0.5;

/// Rate-limit utilization above which the pressure penalty applies
pub const RATE_PRESSURE_THRESHOLD: f64 = 0.8;

/// Multiplier applied to the composite score of a rate-pressured provider
pub const RATE_PRESSURE_PENALTY: f64 = 0.5;

// ============================================================================
// POLICY DEFAULTS
// ============================================================================

/// Default number of fallback retries per request
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default inter-retry delay in milliseconds (scaled linearly per attempt)
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Default per-attempt timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default wall-clock budget for a whole multi-attempt sequence in seconds
pub const DEFAULT_TOTAL_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// MODEL CONSTANTS
// ============================================================================

/// Number of generated units a model cost figure is quoted per
pub const COST_UNIT_TOKENS: u32 = 1000;
