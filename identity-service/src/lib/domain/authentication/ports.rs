use async_trait::async_trait;

use crate::domain::authentication::errors::AuthenticationError;
use crate::domain::authentication::errors::RefreshTokenIdStoreError;
use crate::domain::authentication::models::ActiveUser;
use crate::domain::authentication::models::RefreshTokenId;
use crate::domain::authentication::models::SignInCommand;
use crate::domain::authentication::models::SignUpCommand;
use crate::domain::authentication::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for authentication operations.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * Any other hashing or store failure, unchanged
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, AuthenticationError>;

    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `PasswordMismatch` - Password does not match the stored hash
    async fn sign_in(&self, command: SignInCommand) -> Result<TokenPair, AuthenticationError>;

    /// Exchange a refresh token for a new pair, consuming its rotation identifier.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - For every failure, whatever the cause
    async fn refresh_tokens(&self, refresh_token: &str)
        -> Result<TokenPair, AuthenticationError>;

    /// Verify an access token.
    ///
    /// # Errors
    /// * `InvalidAccessToken` - Token is invalid, expired, or not an access token
    async fn authenticate_access_token(
        &self,
        access_token: &str,
    ) -> Result<ActiveUser, AuthenticationError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_user(&self, id: &UserId) -> Result<User, AuthenticationError>;
}

/// Tracks the single live refresh token identifier of each user.
#[async_trait]
pub trait RefreshTokenIdStore: Send + Sync + 'static {
    /// Set the current identifier, replacing any previous one.
    async fn record_identifier(
        &self,
        user_id: &UserId,
        token_id: &RefreshTokenId,
    ) -> Result<(), RefreshTokenIdStoreError>;

    /// Whether `token_id` is the current identifier. False when none is stored.
    async fn is_current_identifier(
        &self,
        user_id: &UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshTokenIdStoreError>;

    /// Remove the current identifier.
    async fn clear(&self, user_id: &UserId) -> Result<(), RefreshTokenIdStoreError>;

    /// Atomically remove the identifier if it equals `token_id`.
    ///
    /// # Returns
    /// True if `token_id` was current and is now cleared
    async fn take_if_current(
        &self,
        user_id: &UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshTokenIdStoreError>;
}
