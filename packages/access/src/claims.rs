//! Claim schema and the typed encode/decode boundary.
//!
//! The claim names are defined once here and used by both [`crate::Producer`]
//! and [`crate::Parser`], so the two sides cannot drift apart.

use crate::error::{AccessError, AccessResult};
use crate::types::Payload;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

/// User identifier claim (hyphenated UUID string)
pub const USER_ID: &str = "user_id";
/// E-mail claim
pub const EMAIL: &str = "email";
/// Optional nickname claim
pub const NICKNAME: &str = "nickname";
/// Role claim
pub const ROLE: &str = "role";
/// Subscription plan claim
pub const SUBSCRIPTION_PLAN: &str = "subscription_plan";
/// Expiration (unix seconds)
pub const EXPIRATION: &str = "exp";
/// Issued-at (unix seconds)
pub const ISSUED_AT: &str = "iat";
/// Not-before (unix seconds)
pub const NOT_BEFORE: &str = "nbf";

/// Flat claim set as it travels in the token
pub type ClaimsMap = Map<String, Value>;

/// Validity window read back from a verified claim set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimeClaims {
    pub(crate) expiration: i64,
    pub(crate) not_before: Option<i64>,
    pub(crate) issued_at: Option<i64>,
}

/// Build the claim set for `payload` issued at `now`.
///
/// `iat` and `nbf` both equal `now`; `exp` is the instant `now + ttl`
/// truncated to whole seconds, but never earlier than `iat + 1` for a
/// positive `ttl`. The nickname is left out entirely when absent.
pub(crate) fn encode(
    payload: &Payload,
    now: DateTime<Utc>,
    ttl: Duration,
) -> AccessResult<ClaimsMap> {
    if payload.email.is_empty() {
        return Err(AccessError::invalid_claims("email must not be empty"));
    }

    let issued_at = now.timestamp();
    let mut expiration = now
        .checked_add_signed(ttl)
        .ok_or_else(|| AccessError::invalid_claims("ttl overflows the expiration claim"))?
        .timestamp();
    if ttl > Duration::zero() && expiration <= issued_at {
        // sub-second ttl inside the issuing second
        expiration = issued_at.saturating_add(1);
    }

    let mut claims = ClaimsMap::new();
    claims.insert(USER_ID.into(), Value::String(payload.user_id.to_string()));
    claims.insert(EMAIL.into(), Value::String(payload.email.clone()));
    if let Some(nickname) = &payload.nickname {
        claims.insert(NICKNAME.into(), Value::String(nickname.clone()));
    }
    claims.insert(ROLE.into(), Value::String(payload.role.clone()));
    claims.insert(
        SUBSCRIPTION_PLAN.into(),
        Value::String(payload.subscription_plan.clone()),
    );
    claims.insert(EXPIRATION.into(), Value::from(expiration));
    claims.insert(ISSUED_AT.into(), Value::from(issued_at));
    claims.insert(NOT_BEFORE.into(), Value::from(issued_at));

    Ok(claims)
}

/// Read the validity window. `exp` is required; `nbf` and `iat` are optional
/// but must be integers when present.
pub(crate) fn time_claims(claims: &ClaimsMap) -> AccessResult<TimeClaims> {
    let expiration = optional_timestamp(claims, EXPIRATION)?
        .ok_or_else(|| AccessError::invalid_claims("missing claim 'exp'"))?;

    Ok(TimeClaims {
        expiration,
        not_before: optional_timestamp(claims, NOT_BEFORE)?,
        issued_at: optional_timestamp(claims, ISSUED_AT)?,
    })
}

/// Rebuild the payload from a verified claim set.
pub(crate) fn decode(claims: &ClaimsMap) -> AccessResult<Payload> {
    let user_id = required_str(claims, USER_ID)?;
    let user_id = Uuid::parse_str(user_id).map_err(|e| {
        AccessError::InvalidClaims(format!("claim '{USER_ID}' is not a UUID: {e}"))
    })?;

    let email = required_str(claims, EMAIL)?;
    if email.is_empty() {
        return Err(AccessError::invalid_claims("claim 'email' is empty"));
    }

    Ok(Payload {
        user_id,
        email: email.to_string(),
        nickname: nickname(claims)?,
        role: required_str(claims, ROLE)?.to_string(),
        subscription_plan: required_str(claims, SUBSCRIPTION_PLAN)?.to_string(),
    })
}

/// An empty (or null) nickname is the same as no nickname.
fn nickname(claims: &ClaimsMap) -> AccessResult<Option<String>> {
    match claims.get(NICKNAME) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(nickname)) if nickname.is_empty() => Ok(None),
        Some(Value::String(nickname)) => Ok(Some(nickname.clone())),
        Some(_) => Err(AccessError::InvalidClaims(format!(
            "claim '{NICKNAME}' must be a string"
        ))),
    }
}

fn required_str<'a>(claims: &'a ClaimsMap, name: &str) -> AccessResult<&'a str> {
    match claims.get(name) {
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(AccessError::InvalidClaims(format!(
            "claim '{name}' must be a string"
        ))),
        None => Err(AccessError::InvalidClaims(format!("missing claim '{name}'"))),
    }
}

fn optional_timestamp(claims: &ClaimsMap, name: &str) -> AccessResult<Option<i64>> {
    match claims.get(name) {
        None => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or_else(|| {
            AccessError::InvalidClaims(format!("claim '{name}' must be an integer timestamp"))
        }),
    }
}
