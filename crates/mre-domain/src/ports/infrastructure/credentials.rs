//! Credential Store Port
//!
//! Key-value access to at-rest user secrets. The store is external; the
//! engine only reads. Decryption happens behind the
//! [`crate::ports::providers::crypto::CryptoProvider`] port.

use crate::error::Result;
use crate::ports::providers::crypto::EncryptedData;
use crate::value_objects::provider::ProviderType;
use async_trait::async_trait;

/// External key-value credential store
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the encrypted secret for (user, provider type)
    ///
    /// Returns `None` when the user has no credential for the type or the
    /// credential is disabled; disabled credentials are indistinguishable
    /// from absent ones at this boundary.
    async fn get_encrypted(
        &self,
        user_id: &str,
        provider_type: ProviderType,
    ) -> Result<Option<EncryptedData>>;
}
