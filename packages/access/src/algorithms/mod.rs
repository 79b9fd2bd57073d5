//! Token signing algorithms
//!
//! Only the RSASSA-PKCS1-v1_5 family is implemented. Anything else a header
//! declares (`none`, HMAC, ECDSA, PSS) is refused before a key is touched.

pub(crate) mod rsa;
pub(crate) mod utils;

use crate::error::{AccessError, AccessResult};
use std::fmt;

/// RSA signing algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256
    #[default]
    Rs256,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    Rs384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    Rs512,
}

impl Algorithm {
    /// Header `alg` value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Rs256 => "RS256",
            Algorithm::Rs384 => "RS384",
            Algorithm::Rs512 => "RS512",
        }
    }

    /// Resolve a header `alg` value.
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` for anything outside the RSA family
    pub fn from_header(alg: &str) -> AccessResult<Self> {
        match alg {
            "RS256" => Ok(Algorithm::Rs256),
            "RS384" => Ok(Algorithm::Rs384),
            "RS512" => Ok(Algorithm::Rs512),
            other => Err(AccessError::unsupported_algorithm(other)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
