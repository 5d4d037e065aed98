//! Encryption/decryption service using AES-GCM

use crate::constants::*;
use aes_gcm::{
    aead::{rand_core::RngCore as AeadRngCore, Aead, AeadCore, KeyInit, OsRng as AeadOsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::Engine as _;
use mre_domain::error::{Error, Result};
use mre_domain::ports::providers::crypto::{CryptoProvider, EncryptedData};
use sha2::{Digest, Sha256};

use super::utils::bytes_to_hex;

/// Encryption/decryption service
///
/// Implements the `CryptoProvider` port from mre-domain. The master key
/// is process-wide configuration; credential rows carry only ciphertext
/// and nonce.
#[derive(Clone)]
pub struct CryptoService {
    /// Master key for encryption operations
    master_key: Vec<u8>,
}

impl CryptoService {
    /// Create a new crypto service with the provided master key
    pub fn new(master_key: Vec<u8>) -> Result<Self> {
        if master_key.len() != AES_GCM_KEY_SIZE {
            return Err(Error::Configuration {
                message: format!(
                    "Invalid master key size: expected {} bytes, got {}",
                    AES_GCM_KEY_SIZE,
                    master_key.len()
                ),
                source: None,
            });
        }

        Ok(Self { master_key })
    }

    /// Create a crypto service from a base64-encoded master key
    pub fn from_base64_key(key_b64: &str) -> Result<Self> {
        let key = base64::engine::general_purpose::STANDARD
            .decode(key_b64)
            .map_err(|err| Error::crypto_with_source("Master key is not valid base64", err))?;
        Self::new(key)
    }

    /// Generate a random master key
    pub fn generate_master_key() -> Vec<u8> {
        let mut key = vec![0u8; AES_GCM_KEY_SIZE];
        AeadOsRng.fill_bytes(&mut key);
        key
    }

    /// Encrypt data using AES-GCM
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedData> {
        let key = Key::<Aes256Gcm>::from_slice(&self.master_key);
        let cipher = Aes256Gcm::new(key);
        let nonce = Aes256Gcm::generate_nonce(&mut AeadOsRng);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| Error::Crypto {
                message: format!("Encryption failed: {}", e),
                source: None,
            })?;

        Ok(EncryptedData::new(ciphertext, nonce.to_vec()))
    }

    /// Decrypt data using AES-GCM
    pub fn decrypt(&self, encrypted_data: &EncryptedData) -> Result<Vec<u8>> {
        if encrypted_data.nonce.len() != AES_GCM_NONCE_SIZE {
            return Err(Error::crypto(format!(
                "Invalid nonce size: expected {} bytes, got {}",
                AES_GCM_NONCE_SIZE,
                encrypted_data.nonce.len()
            )));
        }
        let key = Key::<Aes256Gcm>::from_slice(&self.master_key);
        let cipher = Aes256Gcm::new(key);
        let nonce = Nonce::from_slice(&encrypted_data.nonce);

        cipher
            .decrypt(nonce, encrypted_data.ciphertext.as_ref())
            .map_err(|e| Error::Crypto {
                message: format!("Decryption failed: {}", e),
                source: None,
            })
    }

    /// Compute SHA-256 hash of data as hex string
    ///
    /// Used to fingerprint key material in logs without exposing it.
    pub fn sha256_hex(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        bytes_to_hex(&hasher.finalize())
    }
}

// Implement the CryptoProvider port from mre-domain
impl CryptoProvider for CryptoService {
    fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedData> {
        CryptoService::encrypt(self, plaintext)
    }

    fn decrypt(&self, encrypted_data: &EncryptedData) -> Result<Vec<u8>> {
        CryptoService::decrypt(self, encrypted_data)
    }

    fn cipher_name(&self) -> &str {
        "aes-256-gcm"
    }
}
