//! Cryptographic services
//!
//! AES-256-GCM implementation of the domain `CryptoProvider` port plus
//! small encoding utilities.

/// AES-GCM encryption/decryption service
pub mod encryption;
/// Byte/hex conversion helpers
pub mod utils;

pub use encryption::CryptoService;
