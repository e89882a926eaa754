use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairData;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh_tokens<S: AuthenticationServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<RefreshTokensRequest>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    state
        .authentication_service
        .refresh_tokens(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokensRequest {
    refresh_token: String,
}
