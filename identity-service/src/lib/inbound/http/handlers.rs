use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::authentication::errors::AuthenticationError;
use crate::domain::authentication::models::TokenPair;

pub mod get_current_user;
pub mod refresh_tokens;
pub mod sign_in;
pub mod sign_up;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AuthenticationError> for ApiError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AuthenticationError::UserNotFound
            | AuthenticationError::PasswordMismatch
            | AuthenticationError::InvalidRefreshToken
            | AuthenticationError::InvalidAccessToken => ApiError::Unauthorized(err.to_string()),
            AuthenticationError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AuthenticationError::Password(_)
            | AuthenticationError::Token(_)
            | AuthenticationError::Storage(_)
            | AuthenticationError::Task(_)
            | AuthenticationError::User(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Token pair as returned by sign-in and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPairData {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenPairData {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::authentication::errors::RefreshTokenIdStoreError;
    use crate::domain::user::errors::UserError;

    #[test]
    fn test_authentication_errors_map_to_status() {
        assert!(matches!(
            ApiError::from(AuthenticationError::EmailAlreadyExists("a@x.com".to_string())),
            ApiError::Conflict(_)
        ));
        assert_eq!(
            ApiError::from(AuthenticationError::InvalidRefreshToken),
            ApiError::Unauthorized("Unauthorized".to_string())
        );
        assert_eq!(
            ApiError::from(AuthenticationError::UserNotFound),
            ApiError::Unauthorized("User does not exist".to_string())
        );
        assert_eq!(
            ApiError::from(AuthenticationError::NotFound("7".to_string())),
            ApiError::NotFound("User not found: 7".to_string())
        );
        assert_eq!(
            ApiError::from(AuthenticationError::PasswordMismatch),
            ApiError::Unauthorized("Password does not match".to_string())
        );
        assert!(matches!(
            ApiError::from(AuthenticationError::Storage(
                RefreshTokenIdStoreError::DatabaseError("down".to_string())
            )),
            ApiError::InternalServerError(_)
        ));
        assert!(matches!(
            ApiError::from(AuthenticationError::from(UserError::DatabaseError(
                "down".to_string()
            ))),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let response =
            ApiError::InternalServerError("db password leaked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
