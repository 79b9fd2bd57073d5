//! Wiring producers and parsers from configuration

mod common;

use chrono::Duration;
use common::{fixture_path, sample_payload};
use std::collections::HashMap;
use std::path::PathBuf;
use tokens_access::{
    AccessConfig, AccessError, ENV_LEEWAY_SECS, ENV_PRIVATE_KEY_PATH, ENV_PUBLIC_KEY_PATH,
    ENV_TTL_SECS,
};

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

fn key_pair_config(leeway_secs: &str) -> AccessConfig {
    let private = fixture_path("private_a.pem");
    let public = fixture_path("public_a.pem");
    AccessConfig::from_lookup(lookup_from(&[
        (ENV_PRIVATE_KEY_PATH, private.to_str().expect("utf-8 path")),
        (ENV_PUBLIC_KEY_PATH, public.to_str().expect("utf-8 path")),
        (ENV_LEEWAY_SECS, leeway_secs),
    ]))
    .expect("config should load")
}

#[test]
fn unset_variables_keep_defaults() {
    let config = AccessConfig::from_lookup(|_| None).expect("defaults are valid");

    assert_eq!(config, AccessConfig::default());
    assert_eq!(config.ttl(), Duration::minutes(15));
    assert_eq!(config.leeway(), Duration::zero());
    assert!(config.private_key_path.is_none());
    assert!(config.public_key_path.is_none());
}

#[test]
fn variables_are_parsed() {
    let config = AccessConfig::from_lookup(lookup_from(&[
        (ENV_PRIVATE_KEY_PATH, "/etc/keys/private.pem"),
        (ENV_PUBLIC_KEY_PATH, "/etc/keys/public.der"),
        (ENV_TTL_SECS, " 3600 "),
        (ENV_LEEWAY_SECS, "30"),
    ]))
    .expect("config should load");

    assert_eq!(
        config.private_key_path,
        Some(PathBuf::from("/etc/keys/private.pem"))
    );
    assert_eq!(
        config.public_key_path,
        Some(PathBuf::from("/etc/keys/public.der"))
    );
    assert_eq!(config.ttl(), Duration::hours(1));
    assert_eq!(config.leeway(), Duration::seconds(30));
}

#[test]
fn empty_paths_count_as_unset() {
    let config = AccessConfig::from_lookup(lookup_from(&[
        (ENV_PRIVATE_KEY_PATH, ""),
        (ENV_PUBLIC_KEY_PATH, ""),
    ]))
    .expect("config should load");

    assert!(config.private_key_path.is_none());
    assert!(config.public_key_path.is_none());
}

#[test]
fn bad_numbers_are_config_errors() {
    for vars in [
        [(ENV_TTL_SECS, "fifteen minutes")],
        [(ENV_LEEWAY_SECS, "-5")],
        [(ENV_LEEWAY_SECS, "1.5")],
    ] {
        let result = AccessConfig::from_lookup(lookup_from(&vars));
        assert!(
            matches!(result, Err(AccessError::Config(_))),
            "{vars:?} was accepted"
        );
    }
}

#[test]
fn ttl_must_be_positive() {
    for ttl in ["0", "-60"] {
        let result = AccessConfig::from_lookup(lookup_from(&[(ENV_TTL_SECS, ttl)]));
        assert!(matches!(result, Err(AccessError::Config(_))), "ttl {ttl} was accepted");
    }
}

#[test]
fn config_deserializes_with_defaults() {
    let config: AccessConfig =
        serde_json::from_str(r#"{ "public_key_path": "keys/public.pem", "leeway_secs": 5 }"#)
            .expect("config should deserialize");

    assert_eq!(config.public_key_path, Some(PathBuf::from("keys/public.pem")));
    assert_eq!(config.ttl_secs, 900);
    assert_eq!(config.leeway(), Duration::seconds(5));
    assert!(config.validate().is_ok());

    let zero_ttl: AccessConfig =
        serde_json::from_str(r#"{ "ttl_secs": 0 }"#).expect("config should deserialize");
    assert!(matches!(zero_ttl.validate(), Err(AccessError::Config(_))));
}

#[tokio::test]
async fn configured_halves_round_trip() {
    let config = key_pair_config("0");
    let producer = config.producer().await.expect("producer should build");
    let parser = config.parser().await.expect("parser should build");

    let token = producer
        .produce(&sample_payload(), config.ttl())
        .expect("token should be produced");
    assert_eq!(parser.parse(&token).expect("token should parse"), sample_payload());
}

#[tokio::test]
async fn configured_parser_applies_leeway() {
    let producer = key_pair_config("0")
        .producer()
        .await
        .expect("producer should build");
    let token = producer
        .produce(&sample_payload(), Duration::seconds(-5))
        .expect("token should be produced");

    let strict = key_pair_config("0").parser().await.expect("parser should build");
    assert!(matches!(strict.parse(&token), Err(AccessError::Expired)));

    let lenient = key_pair_config("60").parser().await.expect("parser should build");
    assert_eq!(lenient.leeway(), Duration::seconds(60));
    assert!(lenient.parse(&token).is_ok());
}

#[tokio::test]
async fn missing_paths_are_config_errors() {
    let config = AccessConfig::default();

    assert!(matches!(config.producer().await, Err(AccessError::Config(_))));
    assert!(matches!(config.parser().await, Err(AccessError::Config(_))));
}

#[tokio::test]
async fn unreadable_key_file_surfaces_the_path() {
    let config = AccessConfig {
        public_key_path: Some(fixture_path("missing.der")),
        ..AccessConfig::default()
    };

    match config.parser().await {
        Err(AccessError::KeySource { path, .. }) => assert_eq!(path, fixture_path("missing.der")),
        other => panic!("expected KeySource, got {other:?}"),
    }
}
