use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Custom claim carrying the user's email on access tokens.
pub const EMAIL_CLAIM: &str = "email";

/// Custom claim carrying the rotation identifier on refresh tokens.
pub const REFRESH_TOKEN_ID_CLAIM: &str = "refreshTokenId";

/// Generic JWT claims structure.
///
/// Supports standard RFC 7519 claims plus custom fields via `extra` map.
/// All standard fields are optional for maximum flexibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Claims {
    /// Subject (user/entity identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// JWT ID (unique token identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a subject, issued now and expiring after `time_to_live`.
    ///
    /// # Arguments
    /// * `subject` - Unique subject identifier
    /// * `time_to_live` - Lifetime of the token
    ///
    /// # Errors
    /// * `LifetimeOutOfRange` - Expiration is not representable as a timestamp
    pub fn issued_for(
        subject: impl ToString,
        time_to_live: Duration,
    ) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(time_to_live)
            .ok_or_else(|| JwtError::LifetimeOutOfRange(time_to_live.to_string()))?;

        Ok(Self {
            sub: Some(subject.to_string()),
            exp: Some(expires_at.timestamp()),
            iat: Some(now.timestamp()),
            ..Self::default()
        })
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Set audience.
    pub fn with_audience(mut self, aud: impl Into<String>) -> Self {
        self.aud = Some(aud.into());
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Read a custom string field.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }

    /// Email of an access token.
    pub fn email(&self) -> Option<&str> {
        self.extra_str(EMAIL_CLAIM)
    }

    /// Rotation identifier of a refresh token.
    pub fn refresh_token_id(&self) -> Option<&str> {
        self.extra_str(REFRESH_TOKEN_ID_CLAIM)
    }
}
