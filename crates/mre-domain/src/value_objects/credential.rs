//! Per-User Credential Value Objects

use crate::ports::providers::crypto::EncryptedData;
use crate::value_objects::provider::ProviderType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Encrypted BYOK secret owned by one user for one provider type
///
/// Owned and mutated only by the owning user (or an admin acting on their
/// behalf); the engine only reads and decrypts it. Absence means the
/// engine falls back to the operator-level provider credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredential {
    /// Owning user
    pub user_id: String,
    /// Provider type the secret authenticates against
    pub provider_type: ProviderType,
    /// Encrypted secret material
    pub secret: EncryptedData,
    /// Disabled credentials are treated as absent
    pub enabled: bool,
}

/// Who pays for an attempt made with a resolved credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialOrigin {
    /// User-supplied key: upstream cost accrues to the user directly
    User,
    /// Operator-level key: the operator absorbs upstream cost
    Operator,
}

/// Decrypted secret ready for one dispatch, tagged with its origin
#[derive(Clone)]
pub struct ResolvedCredential {
    /// Plaintext secret injected into the upstream call
    pub secret: String,
    /// Attribution of upstream cost
    pub origin: CredentialOrigin,
}

impl ResolvedCredential {
    /// Wrap a decrypted user secret
    pub fn user<S: Into<String>>(secret: S) -> Self {
        Self {
            secret: secret.into(),
            origin: CredentialOrigin::User,
        }
    }

    /// Wrap a decrypted operator secret
    pub fn operator<S: Into<String>>(secret: S) -> Self {
        Self {
            secret: secret.into(),
            origin: CredentialOrigin::Operator,
        }
    }
}

// Manual Debug keeps plaintext secrets out of logs and panic messages.
impl fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("secret", &"<redacted>")
            .field("origin", &self.origin)
            .finish()
    }
}
