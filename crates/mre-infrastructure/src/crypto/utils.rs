//! Byte conversion helpers for crypto material

use mre_domain::error::{Error, Result};

/// Convert bytes to a lowercase hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Convert a hex string back to bytes
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>> {
    hex::decode(s).map_err(|err| Error::crypto_with_source("Invalid hex key material", err))
}
