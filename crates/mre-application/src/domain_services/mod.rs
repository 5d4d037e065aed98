//! Domain Services
//!
//! Pure, synchronous routing logic: candidate filtering and scoring.
//! Nothing here performs I/O; the use cases feed these functions with
//! snapshots and health views.

/// Deterministic candidate scoring
pub mod scoring;
/// Candidate filtering against catalog, health and credentials
pub mod selection;

pub use scoring::{rank, Candidate, ScoredCandidate};
pub use selection::eligible_candidates;
