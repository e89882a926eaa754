use thiserror::Error;

use crate::domain::user::errors::UserError;
use crate::domain::user::errors::UserIdError;
use crate::domain::user::models::UserId;

/// Error for refresh token identifier storage
#[derive(Debug, Clone, Error)]
pub enum RefreshTokenIdStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Top-level error for authentication operations.
#[derive(Debug, Clone, Error)]
pub enum AuthenticationError {
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("User does not exist")]
    UserNotFound,

    #[error("Password does not match")]
    PasswordMismatch,

    #[error("Unauthorized")]
    InvalidRefreshToken,

    #[error("Invalid or expired token")]
    InvalidAccessToken,

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Refresh token storage error: {0}")]
    Storage(#[from] RefreshTokenIdStoreError),

    #[error("Task failed: {0}")]
    Task(String),

    #[error(transparent)]
    User(UserError),
}

impl From<UserError> for AuthenticationError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => AuthenticationError::EmailAlreadyExists(email),
            other => AuthenticationError::User(other),
        }
    }
}

/// Every reason a refresh token can be turned down.
///
/// Kept for logging only. Callers see `AuthenticationError::InvalidRefreshToken`.
#[derive(Debug, Error)]
pub enum RefreshTokenRejection {
    #[error("verification failed: {0}")]
    Verification(#[from] auth::JwtError),

    #[error("missing claim: {0}")]
    MissingClaim(&'static str),

    #[error("invalid subject: {0}")]
    InvalidSubject(#[from] UserIdError),

    #[error("malformed refresh token id: {0}")]
    MalformedTokenId(String),

    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    #[error("refresh token id is not current for user {0}")]
    IdentifierMismatch(UserId),

    #[error("credential store: {0}")]
    Users(#[from] UserError),

    #[error("refresh token storage: {0}")]
    Storage(#[from] RefreshTokenIdStoreError),

    #[error("issuing new pair: {0}")]
    Issuance(#[from] AuthenticationError),
}
