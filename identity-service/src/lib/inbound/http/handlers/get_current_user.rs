use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::ActiveUser;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

pub async fn get_current_user<S: AuthenticationServicePort>(
    State(state): State<AppState<S>>,
    Extension(active_user): Extension<ActiveUser>,
) -> Result<ApiSuccess<CurrentUserResponseData>, ApiError> {
    state
        .authentication_service
        .get_user(&active_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for CurrentUserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
