//! Credential Resolution
//!
//! Resolves the secret to inject into one upstream attempt: the user's
//! own key first (user-pays), then the operator-level provider key
//! (operator-pays), else nothing. Integrity failures disqualify the one
//! candidate and never fail the whole request.

use mre_domain::error::{Error, Result};
use mre_domain::ports::infrastructure::credentials::CredentialStore;
use mre_domain::ports::providers::crypto::{CryptoProvider, EncryptedData};
use mre_domain::value_objects::credential::ResolvedCredential;
use mre_domain::value_objects::provider::{Provider, ProviderType};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, warn};

/// Resolves usable secrets for dispatch attempts
pub struct CredentialResolver {
    store: Arc<dyn CredentialStore>,
    crypto: Arc<dyn CryptoProvider>,
}

impl CredentialResolver {
    /// Create a resolver over an external store and a cipher
    pub fn new(store: Arc<dyn CredentialStore>, crypto: Arc<dyn CryptoProvider>) -> Self {
        Self { store, crypto }
    }

    /// Resolve the secret for one candidate provider
    ///
    /// `Ok(None)` means the candidate must be skipped without counting a
    /// health failure. A corrupt user credential does not fall back to
    /// the operator key: the user opted into BYOK, and silently shifting
    /// their traffic onto the operator's account would misattribute cost.
    pub async fn resolve(
        &self,
        user_id: &str,
        provider: &Provider,
    ) -> Result<Option<ResolvedCredential>> {
        match self
            .store
            .get_encrypted(user_id, provider.provider_type)
            .await
        {
            Ok(Some(encrypted)) => {
                return Ok(match self.decrypt(&encrypted) {
                    Ok(secret) => Some(ResolvedCredential::user(secret)),
                    Err(err) => {
                        error!(
                            user_id,
                            provider = %provider.name,
                            error = %err,
                            "user credential failed integrity check; disqualifying candidate"
                        );
                        None
                    }
                });
            }
            Ok(None) => {}
            Err(err) => {
                // Store failure disqualifies the candidate rather than
                // silently shifting cost onto the operator account.
                warn!(
                    user_id,
                    provider = %provider.name,
                    error = %err,
                    "credential store lookup failed; skipping candidate"
                );
                return Ok(None);
            }
        }

        if let Some(encrypted) = &provider.operator_credential {
            return Ok(match self.decrypt(encrypted) {
                Ok(secret) => Some(ResolvedCredential::operator(secret)),
                Err(err) => {
                    error!(
                        provider = %provider.name,
                        error = %err,
                        "operator credential failed integrity check; disqualifying candidate"
                    );
                    None
                }
            });
        }

        Ok(None)
    }

    /// Provider types this user holds a stored credential for
    ///
    /// Used by candidate selection so providers with neither a user nor
    /// an operator credential never reach the ranked list. Ciphertext is
    /// not decrypted here; integrity is only checked at resolve time.
    pub async fn available_types(&self, user_id: &str) -> HashSet<ProviderType> {
        let mut available = HashSet::new();
        for provider_type in ProviderType::ALL {
            match self.store.get_encrypted(user_id, provider_type).await {
                Ok(Some(_)) => {
                    available.insert(provider_type);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(
                        user_id,
                        provider_type = %provider_type,
                        error = %err,
                        "credential availability probe failed"
                    );
                }
            }
        }
        available
    }

    fn decrypt(&self, encrypted: &EncryptedData) -> Result<String> {
        let plaintext = self.crypto.decrypt(encrypted)?;
        String::from_utf8(plaintext)
            .map_err(|err| Error::crypto_with_source("Decrypted secret is not valid UTF-8", err))
    }
}
