use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT handling.
///
/// Tokens produced here carry the configured issuer and audience, and
/// validation rejects tokens that do not.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Set the issuer stamped on and required from tokens.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.jwt_handler = self.jwt_handler.with_issuer(issuer);
        self
    }

    /// Set the audience stamped on and required from tokens.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.jwt_handler = self.jwt_handler.with_audience(audience);
        self
    }

    /// Replace the default password hasher.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Build claims for `subject` expiring after `time_to_live`, stamped
    /// with the configured issuer and audience.
    ///
    /// # Errors
    /// * `JwtError` - Expiration is out of range
    pub fn claims_for(
        &self,
        subject: impl ToString,
        time_to_live: Duration,
    ) -> Result<Claims, JwtError> {
        let mut claims = Claims::issued_for(subject, time_to_live)?;
        claims.iss = self.jwt_handler.issuer().map(str::to_string);
        claims.aud = self.jwt_handler.audience().map(str::to_string);
        Ok(claims)
    }

    /// Sign claims into a JWT token.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Validate and decode JWT token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        self.jwt_handler.decode(token)
    }
}
