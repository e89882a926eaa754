use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_current_user::get_current_user;
use super::handlers::refresh_tokens::refresh_tokens;
use super::handlers::sign_in::sign_in;
use super::handlers::sign_up::sign_up;
use super::middleware::authenticate as auth_middleware;
use crate::domain::authentication::ports::AuthenticationServicePort;

pub struct AppState<S: AuthenticationServicePort> {
    pub authentication_service: Arc<S>,
}

impl<S: AuthenticationServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            authentication_service: Arc::clone(&self.authentication_service),
        }
    }
}

pub fn create_router<S: AuthenticationServicePort>(authentication_service: Arc<S>) -> Router {
    let state = AppState {
        authentication_service,
    };

    let public_routes = Router::new()
        .route("/authentication/sign-up", post(sign_up::<S>))
        .route("/authentication/sign-in", post(sign_in::<S>))
        .route("/authentication/refresh-tokens", post(refresh_tokens::<S>));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_current_user::<S>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S>,
        ));

    // Headers are left out of the span, they carry bearer tokens
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
