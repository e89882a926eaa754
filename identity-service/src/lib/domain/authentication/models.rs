use std::fmt;

use chrono::Duration;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

/// Rotation identifier embedded in a refresh token.
///
/// Random (UUID v4), one live value per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefreshTokenId(pub Uuid);

impl RefreshTokenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(RefreshTokenId)
    }
}

impl Default for RefreshTokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RefreshTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Signed access and refresh tokens issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Lifetimes of the two tokens of a pair.
#[derive(Debug, Clone, Copy)]
pub struct TokenLifetimes {
    pub access_token: Duration,
    pub refresh_token: Duration,
}

impl TokenLifetimes {
    pub fn from_seconds(access_token_ttl: i64, refresh_token_ttl: i64) -> Self {
        Self {
            access_token: Duration::seconds(access_token_ttl),
            refresh_token: Duration::seconds(refresh_token_ttl),
        }
    }
}

/// Command to register a new user
#[derive(Debug)]
pub struct SignUpCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl SignUpCommand {
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Command to exchange credentials for a token pair
#[derive(Debug)]
pub struct SignInCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl SignInCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Identity carried by a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveUser {
    pub user_id: UserId,
    pub email: String,
}
