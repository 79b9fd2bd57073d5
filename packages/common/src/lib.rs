//! Common infrastructure for the tokens workspace
//!
//! This crate provides functionality shared by the token crates:
//! - `env_logger` bootstrap driven by `RUST_LOG`
//! - Log-safe fingerprints for tokens and user identifiers

pub mod logging;

pub use logging::LoggingTransformer;
