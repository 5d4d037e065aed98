//! Cryptographic Provider Port
//!
//! Contract for decrypting (and, for admin tooling, encrypting) at-rest
//! credential secrets. The trait is defined here; the AES-256-GCM
//! implementation lives in `mre-infrastructure`. Any authenticated
//! symmetric cipher is substitutable behind this interface.

use crate::error::Result;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Symmetric authenticated encryption port
///
/// The key is process-wide configuration, not request-scoped; callers
/// never see key material, only ciphertext containers.
pub trait CryptoProvider: Send + Sync {
    /// Encrypt plaintext data
    fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedData>;

    /// Decrypt encrypted data
    ///
    /// Fails with a credential-integrity error on corrupt ciphertext or a
    /// wrong key; callers must degrade to "no credential" rather than
    /// propagate.
    fn decrypt(&self, encrypted_data: &EncryptedData) -> Result<Vec<u8>>;

    /// Name/identifier of this cipher implementation
    fn cipher_name(&self) -> &str;
}

/// Encrypted data container
///
/// Holds the ciphertext and nonce produced by encryption. Serializable
/// for transport from the external credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    /// The encrypted ciphertext
    pub ciphertext: Vec<u8>,
    /// The nonce used for encryption
    pub nonce: Vec<u8>,
}

impl EncryptedData {
    /// Create a new encrypted data container
    pub fn new(ciphertext: Vec<u8>, nonce: Vec<u8>) -> Self {
        Self { ciphertext, nonce }
    }

    /// Decode a container from base64 ciphertext and nonce strings, the
    /// form external stores and configuration files carry secrets in
    pub fn from_base64(ciphertext_b64: &str, nonce_b64: &str) -> Result<Self> {
        let engine = base64::engine::general_purpose::STANDARD;
        Ok(Self {
            ciphertext: engine.decode(ciphertext_b64)?,
            nonce: engine.decode(nonce_b64)?,
        })
    }

    /// Encode the container as (ciphertext, nonce) base64 strings
    pub fn to_base64(&self) -> (String, String) {
        let engine = base64::engine::general_purpose::STANDARD;
        (
            engine.encode(&self.ciphertext),
            engine.encode(&self.nonce),
        )
    }
}

impl fmt::Display for EncryptedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EncryptedData {{ ciphertext: {} bytes, nonce: {} bytes }}",
            self.ciphertext.len(),
            self.nonce.len()
        )
    }
}
