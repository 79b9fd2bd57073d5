//! Access token error types

use std::path::PathBuf;
use thiserror::Error;

/// Access token operation result type
pub type AccessResult<T> = Result<T, AccessError>;

/// Access token error types
///
/// Every failure is returned to the immediate caller. Nothing here is
/// retryable: the same input always yields the same error.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Key bytes unparsable in any supported format
    #[error("Invalid key format: {0}")]
    KeyFormat(String),

    /// Key file could not be read
    #[error("Failed to read key from {}: {source}", path.display())]
    KeySource {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Signing failed; a configuration fault, never retried
    #[error("Signing error: {0}")]
    Signing(String),

    /// Token is not three well-formed segments
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Header declares an algorithm outside the RSA family
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signature does not match header and claims under the held key
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token expiration has passed
    #[error("Token has expired")]
    Expired,

    /// Token not-before (or issued-at) lies in the future
    #[error("Token not yet valid")]
    NotYetValid,

    /// Required claim missing or of the wrong shape
    #[error("Invalid claims: {0}")]
    InvalidClaims(String),

    /// Configuration value missing or unparsable
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AccessError {
    /// Create a key format error
    #[inline]
    #[must_use]
    pub fn key_format(msg: &str) -> Self {
        AccessError::KeyFormat(msg.to_string())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(msg: &str) -> Self {
        AccessError::Signing(msg.to_string())
    }

    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(msg: &str) -> Self {
        AccessError::MalformedToken(msg.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        AccessError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create an invalid claims error
    #[inline]
    #[must_use]
    pub fn invalid_claims(msg: &str) -> Self {
        AccessError::InvalidClaims(msg.to_string())
    }

    /// Create a configuration error
    #[inline]
    #[must_use]
    pub fn config(msg: &str) -> Self {
        AccessError::Config(msg.to_string())
    }

    /// True for the rejections `Parser::parse` produces.
    ///
    /// Callers map these to "unauthenticated"; everything else is a
    /// startup or configuration fault.
    #[must_use]
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            AccessError::MalformedToken(_)
                | AccessError::UnsupportedAlgorithm(_)
                | AccessError::InvalidSignature
                | AccessError::Expired
                | AccessError::NotYetValid
                | AccessError::InvalidClaims(_)
        )
    }

    /// Always false; no operation in this crate succeeds on a second attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}
