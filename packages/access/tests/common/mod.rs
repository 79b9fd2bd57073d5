//! Shared fixtures for the access token integration tests
#![allow(dead_code)]

use std::path::PathBuf;
use tokens_access::{Parser, Payload, Producer};
use tokens_common::LoggingTransformer;
use uuid::Uuid;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(fixture_path(name)).expect("fixture should be readable")
}

/// Producer for key pair A
pub fn producer_a() -> Producer {
    LoggingTransformer::init_test();
    Producer::from_pem(&fixture("private_a.pem")).expect("private key A should load")
}

/// Parser for key pair A
pub fn parser_a() -> Parser {
    Parser::from_key_bytes(&fixture("public_a.pem")).expect("public key A should load")
}

/// Parser for the unrelated key pair B
pub fn parser_b() -> Parser {
    Parser::from_key_bytes(&fixture("public_b.pem")).expect("public key B should load")
}

pub fn sample_payload() -> Payload {
    Payload::new(
        Uuid::parse_str("6f1c1a52-8d4e-4f0b-9a3e-2b7c5d9e0f11").expect("valid uuid"),
        "ada@example.com",
        "admin",
        "pro",
    )
}
