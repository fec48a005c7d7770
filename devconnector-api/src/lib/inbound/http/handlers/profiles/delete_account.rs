use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_account(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state.profile_service.delete_account(&caller.user_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("User deleted"),
    ))
}
