//! Token entities for JWT-based authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Input for issuing a token
///
/// `id` becomes the token subject; `role` and `email` are copied into the
/// claims only when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityInput {
    /// Identifier of the principal
    pub id: String,

    /// Optional classification string
    #[serde(default)]
    pub role: Option<String>,

    /// Optional contact identifier
    #[serde(default)]
    pub email: Option<String>,
}

impl IdentityInput {
    /// Creates input carrying only a subject
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: None,
            email: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal identifier)
    ///
    /// Accepts a JSON string or integer; numeric ids are kept as their
    /// decimal text.
    #[serde(deserialize_with = "deserialize_subject")]
    pub sub: String,

    /// Role (if set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Email (if set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    #[serde(default)]
    pub jti: String,
}

impl Claims {
    /// Creates claims for a token issued at `issued_at`
    ///
    /// # Arguments
    ///
    /// * `input` - Identity to encode
    /// * `issued_at` - Creation instant
    /// * `lifetime_seconds` - Token lifetime, must be positive
    pub fn new(input: &IdentityInput, issued_at: DateTime<Utc>, lifetime_seconds: i64) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: input.id.clone(),
            role: input.role.clone(),
            email: input.email.clone(),
            iat,
            exp: iat.saturating_add(lifetime_seconds),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired at `now` (seconds since epoch)
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Seconds left before expiry, zero once expired
    pub fn remaining_lifetime(&self, now: i64) -> i64 {
        (self.exp - now).max(0)
    }

    /// Identity part of the claims, as handed to the request pipeline
    pub fn identity(&self) -> IdentityContext {
        IdentityContext {
            subject: self.sub.clone(),
            role: self.role.clone(),
            email: self.email.clone(),
        }
    }

    /// Issuance input that reproduces this identity
    pub fn to_input(&self) -> IdentityInput {
        IdentityInput {
            id: self.sub.clone(),
            role: self.role.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Subject {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

fn deserialize_subject<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Subject::deserialize(deserializer)? {
        Subject::Text(value) => value,
        Subject::Signed(value) => value.to_string(),
        Subject::Unsigned(value) => value.to_string(),
    })
}

/// Authenticated identity attached to a request
///
/// `role` and `email` serialise as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityContext {
    pub subject: String,
    pub role: Option<String>,
    pub email: Option<String>,
}
