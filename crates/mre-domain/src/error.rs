//! Error handling types

use crate::value_objects::usage::ErrorClass;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Model Routing Engine
///
/// Per-candidate failures (`NoCredential`, `Upstream`) are absorbed inside
/// the dispatcher; only aggregate outcomes (`ServiceUnavailable`,
/// `RateLimitExceeded`, `Cancelled`) cross the engine boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Base64 decoding error
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Generic string-based error
    #[error("String error: {0}")]
    String(String),

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Credential encryption/decryption error
    #[error("Credential integrity error: {message}")]
    Crypto {
        /// Description of the crypto error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No usable credential for a candidate provider
    #[error("No usable credential for provider '{provider}'")]
    NoCredential {
        /// The provider that could not be authenticated against
        provider: String,
    },

    /// A classified failure from one upstream attempt
    #[error("Upstream error from '{provider}' ({class}): {message}")]
    Upstream {
        /// The provider the attempt was issued against
        provider: String,
        /// Failure classification driving retry and health decisions
        class: ErrorClass,
        /// Human-readable description, never a raw upstream body
        message: String,
    },

    /// Caller-side rate limit hit before any candidate was attempted
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Description of the exceeded limit
        message: String,
    },

    /// All candidates exhausted or retry budget spent
    #[error("Service unavailable after {attempts} attempt(s)")]
    ServiceUnavailable {
        /// Number of upstream attempts actually made
        attempts: u32,
    },

    /// The caller abandoned the request mid-flight
    #[error("Request cancelled by caller")]
    Cancelled,

    /// Network-related error outside a classified upstream attempt
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Routing outcome creation methods
impl Error {
    /// Create a no-credential error for a candidate provider
    pub fn no_credential<S: Into<String>>(provider: S) -> Self {
        Self::NoCredential {
            provider: provider.into(),
        }
    }

    /// Create a classified upstream attempt error
    pub fn upstream<P: Into<String>, S: Into<String>>(
        provider: P,
        class: ErrorClass,
        message: S,
    ) -> Self {
        Self::Upstream {
            provider: provider.into(),
            class,
            message: message.into(),
        }
    }

    /// Create a caller-side rate limit error
    pub fn rate_limited<S: Into<String>>(message: S) -> Self {
        Self::RateLimitExceeded {
            message: message.into(),
        }
    }

    /// Create a service unavailable error carrying the attempt count
    pub fn service_unavailable(attempts: u32) -> Self {
        Self::ServiceUnavailable { attempts }
    }

    /// Return the failure class when this is a classified upstream error
    pub fn upstream_class(&self) -> Option<ErrorClass> {
        match self {
            Self::Upstream { class, .. } => Some(*class),
            _ => None,
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Crypto error creation methods
impl Error {
    /// Create a credential integrity error
    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto {
            message: message.into(),
            source: None,
        }
    }

    /// Create a credential integrity error with source
    pub fn crypto_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Crypto {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Network and infrastructure error creation methods
impl Error {
    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
