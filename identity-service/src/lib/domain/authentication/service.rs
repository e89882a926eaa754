use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::EMAIL_CLAIM;
use auth::REFRESH_TOKEN_ID_CLAIM;
use chrono::Utc;

use crate::domain::authentication::errors::AuthenticationError;
use crate::domain::authentication::errors::RefreshTokenRejection;
use crate::domain::authentication::models::ActiveUser;
use crate::domain::authentication::models::RefreshTokenId;
use crate::domain::authentication::models::SignInCommand;
use crate::domain::authentication::models::SignUpCommand;
use crate::domain::authentication::models::TokenLifetimes;
use crate::domain::authentication::models::TokenPair;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::domain::authentication::ports::RefreshTokenIdStore;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for sign-up, sign-in and token rotation.
///
/// Concrete implementation of AuthenticationServicePort with dependency injection.
pub struct AuthenticationService<UR, RS>
where
    UR: UserRepository,
    RS: RefreshTokenIdStore,
{
    users: Arc<UR>,
    refresh_token_ids: Arc<RS>,
    authenticator: Arc<Authenticator>,
    lifetimes: TokenLifetimes,
}

impl<UR, RS> AuthenticationService<UR, RS>
where
    UR: UserRepository,
    RS: RefreshTokenIdStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - Credential store
    /// * `refresh_token_ids` - Rotation identifier store
    /// * `authenticator` - Password hashing and token signing
    /// * `lifetimes` - Access and refresh token TTLs
    pub fn new(
        users: Arc<UR>,
        refresh_token_ids: Arc<RS>,
        authenticator: Arc<Authenticator>,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            users,
            refresh_token_ids,
            authenticator,
            lifetimes,
        }
    }

    /// Sign a fresh access/refresh pair and make its rotation identifier current.
    ///
    /// The identifier is recorded only after both tokens are signed.
    async fn issue_token_pair(&self, user: &User) -> Result<TokenPair, AuthenticationError> {
        let refresh_token_id = RefreshTokenId::new();

        let access_claims = self
            .authenticator
            .claims_for(user.id, self.lifetimes.access_token)?
            .with_extra(EMAIL_CLAIM, user.email.as_str());
        let refresh_claims = self
            .authenticator
            .claims_for(user.id, self.lifetimes.refresh_token)?
            .with_extra(REFRESH_TOKEN_ID_CLAIM, refresh_token_id.to_string());

        let (access_token, refresh_token) =
            tokio::try_join!(self.sign(access_claims), self.sign(refresh_claims))?;

        self.refresh_token_ids
            .record_identifier(&user.id, &refresh_token_id)
            .await?;

        tracing::debug!(user_id = %user.id, "Issued token pair");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn sign(&self, claims: Claims) -> Result<String, AuthenticationError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.generate_token(&claims))
            .await
            .map_err(|e| AuthenticationError::Task(e.to_string()))?
            .map_err(AuthenticationError::from)
    }

    async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, RefreshTokenRejection> {
        let claims: Claims = self.authenticator.validate_token(refresh_token)?;

        let subject = claims
            .sub
            .as_deref()
            .ok_or(RefreshTokenRejection::MissingClaim("sub"))?;
        let user_id = UserId::from_string(subject)?;

        let raw_token_id = claims
            .refresh_token_id()
            .ok_or(RefreshTokenRejection::MissingClaim(REFRESH_TOKEN_ID_CLAIM))?;
        let token_id = RefreshTokenId::parse(raw_token_id)
            .ok_or_else(|| RefreshTokenRejection::MalformedTokenId(raw_token_id.to_string()))?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or(RefreshTokenRejection::UnknownUser(user_id))?;

        // Check and clear in one step so a token can only be redeemed once
        if !self
            .refresh_token_ids
            .take_if_current(&user.id, &token_id)
            .await?
        {
            return Err(RefreshTokenRejection::IdentifierMismatch(user.id));
        }

        Ok(self.issue_token_pair(&user).await?)
    }
}

#[async_trait]
impl<UR, RS> AuthenticationServicePort for AuthenticationService<UR, RS>
where
    UR: UserRepository,
    RS: RefreshTokenIdStore,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, AuthenticationError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let new_user = NewUser {
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let user = self.users.create(new_user).await.map_err(|e| {
            tracing::info!(error = %e, "Sign-up failed");
            AuthenticationError::from(e)
        })?;

        tracing::info!(user_id = %user.id, "User signed up");

        Ok(user)
    }

    async fn sign_in(&self, command: SignInCommand) -> Result<TokenPair, AuthenticationError> {
        let user = self
            .users
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| {
                tracing::info!("Sign-in for unknown email");
                AuthenticationError::UserNotFound
            })?;

        self.authenticator
            .verify_password(&command.password, &user.password_hash)
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => {
                    tracing::info!(user_id = %user.id, "Sign-in with wrong password");
                    AuthenticationError::PasswordMismatch
                }
                auth::AuthenticationError::PasswordError(err) => AuthenticationError::Password(err),
                auth::AuthenticationError::JwtError(err) => AuthenticationError::Token(err),
            })?;

        self.issue_token_pair(&user).await
    }

    async fn refresh_tokens(
        &self,
        refresh_token: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        self.rotate(refresh_token).await.map_err(|rejection| {
            tracing::warn!(reason = %rejection, "Refresh token rejected");
            AuthenticationError::InvalidRefreshToken
        })
    }

    async fn authenticate_access_token(
        &self,
        access_token: &str,
    ) -> Result<ActiveUser, AuthenticationError> {
        let claims: Claims = self.authenticator.validate_token(access_token).map_err(|e| {
            tracing::warn!(error = %e, "Access token validation failed");
            AuthenticationError::InvalidAccessToken
        })?;

        // Refresh tokens carry no email and are not accepted here
        let email = claims
            .email()
            .ok_or(AuthenticationError::InvalidAccessToken)?;
        let user_id = claims
            .sub
            .as_deref()
            .and_then(|sub| UserId::from_string(sub).ok())
            .ok_or(AuthenticationError::InvalidAccessToken)?;

        Ok(ActiveUser {
            user_id,
            email: email.to_string(),
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, AuthenticationError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AuthenticationError::NotFound(id.to_string()))
    }
}
