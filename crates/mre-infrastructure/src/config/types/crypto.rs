//! Master key configuration types

use serde::{Deserialize, Serialize};

/// Credential crypto configuration
///
/// The master key decrypts operator and user credential ciphertext. When
/// absent, an ephemeral key is generated at startup; any configured
/// ciphertext then fails integrity checks and the affected candidates
/// are skipped, so production deployments must pin a key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CryptoConfig {
    /// Base64-encoded 32-byte AES-256-GCM master key
    pub master_key_b64: Option<String>,
}
