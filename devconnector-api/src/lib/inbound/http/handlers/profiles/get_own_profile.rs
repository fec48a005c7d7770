use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ProfileResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_own_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    state
        .profile_service
        .get_own_profile(&caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref owned| ApiSuccess::new(StatusCode::OK, owned.into()))
}
