use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn current_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    state
        .user_service
        .get_user(&caller.user_id)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => {
                tracing::warn!(user_id = %caller.user_id, "Valid token for a deleted user");
                ApiError::Unauthorized("User no longer exists".to_string())
            }
            _ => ApiError::from(e),
        })
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// User record as exposed to clients; the secret hash never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponseData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub date: DateTime<Utc>,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            avatar: user.avatar_url.clone(),
            date: user.created_at,
        }
    }
}
