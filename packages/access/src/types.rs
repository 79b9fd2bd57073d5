//! Access token type definitions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity claims carried by an access token.
///
/// Built by the caller once the identity provider has authenticated the
/// user; `role` and `subscription_plan` are opaque here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// User identifier, encoded as a hyphenated UUID
    pub user_id: Uuid,
    /// E-mail address; must be non-empty
    pub email: String,
    /// Display name. `None` is never encoded; an empty claim decodes to `None`
    pub nickname: Option<String>,
    /// Role name
    pub role: String,
    /// Subscription plan name
    pub subscription_plan: String,
}

impl Payload {
    /// Create a payload without a nickname
    #[must_use]
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        role: impl Into<String>,
        subscription_plan: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            email: email.into(),
            nickname: None,
            role: role.into(),
            subscription_plan: subscription_plan.into(),
        }
    }

    /// Set the nickname
    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }
}

/// Token header structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Signing algorithm
    pub alg: String,
    /// Token type, "JWT" when we write it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl TokenHeader {
    /// Header for a token signed with `alg`
    #[must_use]
    pub fn new(alg: &str) -> Self {
        Self {
            alg: alg.to_string(),
            typ: Some("JWT".to_string()),
        }
    }
}
