//! Access token parser
//!
//! Verification is a fixed pipeline; each stage ends with its own error and
//! no claim is read for its meaning before the signature has been checked:
//!
//! 1. split and decode the three segments (`MalformedToken`)
//! 2. header algorithm must be RS256/RS384/RS512 (`UnsupportedAlgorithm`)
//! 3. RSA signature over `header.claims` (`InvalidSignature`)
//! 4. `nbf`/`iat`/`exp` against the clock (`NotYetValid`, `Expired`)
//! 5. typed claim extraction and nickname normalization (`InvalidClaims`)

use crate::algorithms::{
    Algorithm, rsa,
    utils::{base64_url_decode, signing_input},
};
use crate::claims::{self, ClaimsMap, TimeClaims};
use crate::error::{AccessError, AccessResult};
use crate::keys;
use crate::types::{Payload, TokenHeader};
use crate::RsaPublicKey;
use chrono::{Duration, Utc};
use std::path::Path;
use tokens_common::LoggingTransformer;

/// Verifies compact RSA tokens and rebuilds their payload.
///
/// Holds one public key for its whole life. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct Parser {
    key: RsaPublicKey,
    leeway_secs: i64,
}

/// A token split into its segments, header and claims decoded but untrusted
struct Segments<'a> {
    header_b64: &'a str,
    claims_b64: &'a str,
    signature_b64: &'a str,
    header: TokenHeader,
    claims: ClaimsMap,
}

impl<'a> Segments<'a> {
    fn split(token: &'a str) -> AccessResult<Self> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AccessError::malformed("expected three dot-separated segments"));
        };

        let header_bytes = base64_url_decode(header_b64)
            .map_err(|_| AccessError::malformed("invalid header encoding"))?;
        let header: TokenHeader = serde_json::from_slice(&header_bytes)
            .map_err(|_| AccessError::malformed("invalid header JSON"))?;

        let claims_bytes = base64_url_decode(claims_b64)
            .map_err(|_| AccessError::malformed("invalid claims encoding"))?;
        let claims: ClaimsMap = serde_json::from_slice(&claims_bytes)
            .map_err(|_| AccessError::malformed("claims are not a JSON object"))?;

        Ok(Self {
            header_b64,
            claims_b64,
            signature_b64,
            header,
            claims,
        })
    }
}

impl Parser {
    /// Create a parser with no clock leeway
    #[must_use]
    pub fn new(key: RsaPublicKey) -> Self {
        Self { key, leeway_secs: 0 }
    }

    /// Create a parser from public key bytes, PKCS#1 DER or PEM
    ///
    /// # Errors
    /// `KeyFormat` if the key does not parse in either form
    pub fn from_key_bytes(bytes: &[u8]) -> AccessResult<Self> {
        keys::load_public_key(bytes).map(Self::new)
    }

    /// Create a parser from a public key file, PKCS#1 DER or PEM
    ///
    /// # Errors
    /// `KeySource` if the file cannot be read, `KeyFormat` if it does not parse
    pub async fn from_key_file(path: impl AsRef<Path>) -> AccessResult<Self> {
        keys::read_public_key(path).await.map(Self::new)
    }

    /// Allow `leeway` of clock skew on every temporal check
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway_secs = leeway.num_seconds().abs();
        self
    }

    /// Clock skew allowance
    #[must_use]
    pub fn leeway(&self) -> Duration {
        Duration::seconds(self.leeway_secs)
    }

    /// Verify `token` and return the payload it carries.
    ///
    /// # Errors
    /// One of `MalformedToken`, `UnsupportedAlgorithm`, `InvalidSignature`,
    /// `Expired`, `NotYetValid` or `InvalidClaims`, from the first stage
    /// that fails
    pub fn parse(&self, token: &str) -> AccessResult<Payload> {
        self.parse_at(token, Utc::now().timestamp())
    }

    pub(crate) fn parse_at(&self, token: &str, now: i64) -> AccessResult<Payload> {
        let result = self.verify(token, now);

        match &result {
            Ok(payload) => tracing::debug!(
                user = %LoggingTransformer::fingerprint(&payload.user_id.to_string()),
                token = %LoggingTransformer::fingerprint(token),
                "accepted access token"
            ),
            Err(e) => tracing::warn!(
                token = %LoggingTransformer::fingerprint(token),
                error = %e,
                "rejected access token"
            ),
        }

        result
    }

    fn verify(&self, token: &str, now: i64) -> AccessResult<Payload> {
        let segments = Segments::split(token)?;

        let algorithm = Algorithm::from_header(&segments.header.alg)?;

        let signature =
            base64_url_decode(segments.signature_b64).map_err(|_| AccessError::InvalidSignature)?;
        let message = signing_input(segments.header_b64, segments.claims_b64);
        rsa::verify(algorithm, &message, &signature, &self.key)?;

        let window = claims::time_claims(&segments.claims)?;
        self.check_window(window, now)?;

        claims::decode(&segments.claims)
    }

    /// Valid while `nbf - leeway <= now < exp + leeway`; an `iat` beyond
    /// `now + leeway` counts as not yet valid.
    fn check_window(&self, window: TimeClaims, now: i64) -> AccessResult<()> {
        if now >= window.expiration.saturating_add(self.leeway_secs) {
            return Err(AccessError::Expired);
        }

        let latest_start = now.saturating_add(self.leeway_secs);
        if window.not_before.is_some_and(|nbf| nbf > latest_start)
            || window.issued_at.is_some_and(|iat| iat > latest_start)
        {
            return Err(AccessError::NotYetValid);
        }

        Ok(())
    }
}
