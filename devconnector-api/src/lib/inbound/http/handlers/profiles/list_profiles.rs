use axum::extract::State;
use axum::http::StatusCode;

use super::ProfileResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProfileResponseData>>, ApiError> {
    let profiles = state.profile_service.list_profiles().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        profiles.iter().map(ProfileResponseData::from).collect(),
    ))
}
