//! Access token producer

use crate::algorithms::{
    Algorithm, rsa,
    utils::{base64_url_encode, signing_input},
};
use crate::claims;
use crate::error::{AccessError, AccessResult};
use crate::keys;
use crate::types::{Payload, TokenHeader};
use crate::{RsaPrivateKey, RsaPublicKey};
use chrono::{Duration, Utc};
use std::path::Path;
use tokens_common::LoggingTransformer;

/// Signs payloads into compact RSA tokens.
///
/// Holds one private key for its whole life; rotating keys means building a
/// new `Producer`. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct Producer {
    key: RsaPrivateKey,
    algorithm: Algorithm,
}

impl Producer {
    /// Create a producer signing with RS256
    #[must_use]
    pub fn new(key: RsaPrivateKey) -> Self {
        Self {
            key,
            algorithm: Algorithm::default(),
        }
    }

    /// Create a producer from PEM private key bytes
    ///
    /// # Errors
    /// `KeyFormat` if the key does not parse
    pub fn from_pem(bytes: &[u8]) -> AccessResult<Self> {
        keys::load_private_key(bytes).map(Self::new)
    }

    /// Create a producer from a PEM private key file
    ///
    /// # Errors
    /// `KeySource` if the file cannot be read, `KeyFormat` if it does not parse
    pub async fn from_pem_file(path: impl AsRef<Path>) -> AccessResult<Self> {
        keys::read_private_key(path).await.map(Self::new)
    }

    /// Sign with another member of the RSA family
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Algorithm written into token headers
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Public half of the held key, for building the matching `Parser`
    #[must_use]
    pub fn public_key(&self) -> RsaPublicKey {
        self.key.to_public_key()
    }

    /// Encode `payload` into a signed token valid for `ttl` from now.
    ///
    /// The clock is read once; `iat`, `nbf` and the base of `exp` all come
    /// from that instant. A non-positive `ttl` yields a token that is already
    /// expired.
    ///
    /// # Errors
    /// - `InvalidClaims` if the payload's e-mail is empty
    /// - `Signing` if the RSA operation fails
    pub fn produce(&self, payload: &Payload, ttl: Duration) -> AccessResult<String> {
        let now = Utc::now();
        let claims = claims::encode(payload, now, ttl)?;

        let header = TokenHeader::new(self.algorithm.as_str());
        let header_json =
            serde_json::to_vec(&header).map_err(|e| AccessError::Signing(e.to_string()))?;
        let claims_json =
            serde_json::to_vec(&claims).map_err(|e| AccessError::Signing(e.to_string()))?;

        let message = signing_input(
            &base64_url_encode(&header_json),
            &base64_url_encode(&claims_json),
        );

        let signature = rsa::sign(self.algorithm, &message, &self.key).inspect_err(|e| {
            tracing::error!(algorithm = %self.algorithm, error = %e, "token signing failed");
        })?;

        let token = format!("{message}.{}", base64_url_encode(&signature));

        tracing::debug!(
            algorithm = %self.algorithm,
            user = %LoggingTransformer::fingerprint(&payload.user_id.to_string()),
            token = %LoggingTransformer::fingerprint(&token),
            ttl_secs = ttl.num_seconds(),
            "issued access token"
        );

        Ok(token)
    }
}
