//! RSA-signed access tokens
//!
//! This crate provides the two halves of the access-token protocol:
//! - [`Producer`] signs a [`Payload`] into a compact RS256 token
//! - [`Parser`] verifies a token and rebuilds the [`Payload`]
//! - [`keys`] loads RSA keys from PEM or raw PKCS#1 DER bytes
//! - [`AccessConfig`] wires both halves from key paths and TTL settings
//!
//! The halves never talk to each other; the token string is the only
//! thing that crosses between them.

pub(crate) mod algorithms;
pub mod claims;
mod config;
mod error;
pub mod keys;
mod parser;
mod producer;
mod types;

pub use algorithms::Algorithm;
pub use config::{
    AccessConfig, ENV_LEEWAY_SECS, ENV_PRIVATE_KEY_PATH, ENV_PUBLIC_KEY_PATH, ENV_TTL_SECS,
};
pub use error::*;
pub use parser::Parser;
pub use producer::Producer;
pub use types::*;

// Key types callers hand to `Producer::new` / `Parser::new`
pub use rsa::{RsaPrivateKey, RsaPublicKey};
