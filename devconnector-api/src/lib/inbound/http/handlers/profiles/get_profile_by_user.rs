use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ProfileResponseData;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::profile::errors::ProfileError;

pub async fn get_profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    // A malformed id cannot name a profile.
    let user_id =
        UserId::from_string(&user_id).map_err(|_| ProfileError::NotFound(user_id.clone()))?;

    state
        .profile_service
        .get_profile_by_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref owned| ApiSuccess::new(StatusCode::OK, owned.into()))
}
