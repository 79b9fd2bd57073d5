//! Access token configuration
//!
//! Key paths and timing settings, read from the environment or embedded in a
//! larger serde-deserialized configuration file.

use crate::error::{AccessError, AccessResult};
use crate::parser::Parser;
use crate::producer::Producer;
use chrono::Duration;
use serde::Deserialize;
use std::path::PathBuf;

/// Private key path variable
pub const ENV_PRIVATE_KEY_PATH: &str = "ACCESS_PRIVATE_KEY_PATH";
/// Public key path variable
pub const ENV_PUBLIC_KEY_PATH: &str = "ACCESS_PUBLIC_KEY_PATH";
/// Token lifetime variable, in seconds
pub const ENV_TTL_SECS: &str = "ACCESS_TOKEN_TTL_SECS";
/// Clock leeway variable, in seconds
pub const ENV_LEEWAY_SECS: &str = "ACCESS_TOKEN_LEEWAY_SECS";

const DEFAULT_TTL_SECS: i64 = 15 * 60;

/// Access token settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// PEM private key, needed only by services that issue tokens
    pub private_key_path: Option<PathBuf>,
    /// Public key (PEM or PKCS#1 DER), needed by services that verify tokens
    pub public_key_path: Option<PathBuf>,
    /// Lifetime of issued tokens
    pub ttl_secs: i64,
    /// Clock skew tolerated when verifying
    pub leeway_secs: u64,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            private_key_path: None,
            public_key_path: None,
            ttl_secs: DEFAULT_TTL_SECS,
            leeway_secs: 0,
        }
    }
}

impl AccessConfig {
    /// Read settings from the process environment.
    ///
    /// # Errors
    /// `Config` if a numeric variable does not parse
    pub fn from_env() -> AccessResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`; unset variables keep their defaults.
    ///
    /// # Errors
    /// `Config` if a numeric variable does not parse or the TTL is not positive
    pub fn from_lookup<F>(lookup: F) -> AccessResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.private_key_path = lookup(ENV_PRIVATE_KEY_PATH)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        config.public_key_path = lookup(ENV_PUBLIC_KEY_PATH)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        if let Some(raw) = lookup(ENV_TTL_SECS) {
            config.ttl_secs = raw.trim().parse().map_err(|e| {
                AccessError::Config(format!("{ENV_TTL_SECS}={raw:?} is not an integer: {e}"))
            })?;
        }
        if let Some(raw) = lookup(ENV_LEEWAY_SECS) {
            config.leeway_secs = raw.trim().parse().map_err(|e| {
                AccessError::Config(format!(
                    "{ENV_LEEWAY_SECS}={raw:?} is not a non-negative integer: {e}"
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but make no sense.
    ///
    /// # Errors
    /// `Config` if the TTL is not positive or either duration is out of range
    pub fn validate(&self) -> AccessResult<()> {
        if self.ttl_secs <= 0 {
            return Err(AccessError::config("token TTL must be positive"));
        }
        Duration::try_seconds(self.ttl_secs)
            .ok_or_else(|| AccessError::config("token TTL is out of range"))?;
        i64::try_from(self.leeway_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| AccessError::config("leeway is out of range"))?;
        Ok(())
    }

    /// Lifetime of issued tokens
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::try_seconds(self.ttl_secs).unwrap_or(Duration::seconds(DEFAULT_TTL_SECS))
    }

    /// Clock skew tolerated when verifying
    #[must_use]
    pub fn leeway(&self) -> Duration {
        i64::try_from(self.leeway_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or_else(Duration::zero)
    }

    /// Build a producer from the configured private key.
    ///
    /// # Errors
    /// `Config` if no private key path is set; otherwise key loading errors
    pub async fn producer(&self) -> AccessResult<Producer> {
        let path = self
            .private_key_path
            .as_ref()
            .ok_or_else(|| AccessError::Config(format!("{ENV_PRIVATE_KEY_PATH} is not set")))?;

        let producer = Producer::from_pem_file(path).await?;
        tracing::info!(path = %path.display(), "access token producer ready");
        Ok(producer)
    }

    /// Build a parser from the configured public key, with the configured leeway.
    ///
    /// # Errors
    /// `Config` if no public key path is set; otherwise key loading errors
    pub async fn parser(&self) -> AccessResult<Parser> {
        let path = self
            .public_key_path
            .as_ref()
            .ok_or_else(|| AccessError::Config(format!("{ENV_PUBLIC_KEY_PATH} is not set")))?;

        let parser = Parser::from_key_file(path).await?.with_leeway(self.leeway());
        tracing::info!(
            path = %path.display(),
            leeway_secs = self.leeway_secs,
            "access token parser ready"
        );
        Ok(parser)
    }
}
