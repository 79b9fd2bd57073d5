//! Structured logging bootstrap
//!
//! Provides env_logger-based logging with secure handling of sensitive data.
//! The token crates emit through `tracing`; with its `log` bridge enabled those
//! events land in the logger installed here.

use log::info;
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above (recommended for production)
    /// - `RUST_LOG=tokens_access=debug` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; later calls are no-ops.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log-safe fingerprint of a sensitive value (token, user id, e-mail)
    ///
    /// SHA-256 of the value, shortened to the first 12 hex characters and
    /// prefixed with `#`. Stable across calls so events can be correlated.
    #[must_use]
    pub fn fingerprint(value: &str) -> String {
        let hash = Sha256::digest(value.as_bytes());
        let hex_hash = format!("{hash:x}");
        format!("#{}", &hex_hash[..12])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_short() {
        LoggingTransformer::init_test();

        let first = LoggingTransformer::fingerprint("eyJhbGciOiJSUzI1NiJ9.e30.c2ln");
        let other = LoggingTransformer::fingerprint("eyJhbGciOiJSUzI1NiJ9.e30.b3RoZXI");

        assert_ne!(first, other);
        assert_eq!(
            first,
            LoggingTransformer::fingerprint("eyJhbGciOiJSUzI1NiJ9.e30.c2ln")
        );
        assert!(first.starts_with('#'));
        assert_eq!(first.len(), 13);
    }

    #[test]
    fn fingerprint_does_not_echo_input() {
        let fp = LoggingTransformer::fingerprint("alice@example.com");
        assert!(!fp.contains("alice"));
    }

    #[test]
    fn init_is_idempotent() {
        LoggingTransformer::init_test();
        LoggingTransformer::init_test();
    }
}
