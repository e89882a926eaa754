use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::inbound::http::router::AppState;

/// Validates the bearer access token and stores the `ActiveUser` in request extensions.
pub async fn authenticate<S: AuthenticationServicePort>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Owned so the request is not borrowed across the await
    let token = extract_token_from_header(&req)?.to_string();

    let active_user = state
        .authentication_service
        .authenticate_access_token(&token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(active_user);

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let unauthorized = |message: &str| ApiError::Unauthorized(message.to_string()).into_response();

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
    })
}
