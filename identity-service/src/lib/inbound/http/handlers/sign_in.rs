use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairData;
use crate::authentication::errors::AuthenticationError;
use crate::domain::authentication::models::SignInCommand;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn sign_in<S: AuthenticationServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<SignInRequest>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    // A malformed email cannot belong to a registered user
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::from(AuthenticationError::UserNotFound))?;

    state
        .authentication_service
        .sign_in(SignInCommand::new(email, body.password))
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequest {
    email: String,
    password: String,
}
