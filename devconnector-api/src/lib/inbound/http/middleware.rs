use std::sync::Arc;

use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;

/// Header carrying the bearer token
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Reasons the gate turns a request away
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateRejection {
    #[error("No token, authorization denied")]
    MissingToken,

    #[error("Token is not valid")]
    InvalidToken,
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        ApiError::Unauthorized(self.to_string()).into_response()
    }
}

/// Resolve the caller from request headers without touching the store.
///
/// # Errors
/// * `MissingToken` - Header absent, empty, or not visible ASCII
/// * `InvalidToken` - Signature, expiry or subject check failed
pub fn resolve_identity(
    headers: &HeaderMap,
    authenticator: &Authenticator,
) -> Result<AuthenticatedUser, GateRejection> {
    let token = headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(GateRejection::MissingToken)?;

    let subject = authenticator.verify_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        GateRejection::InvalidToken
    })?;

    let user_id = UserId::from_string(&subject).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user id");
        GateRejection::InvalidToken
    })?;

    Ok(AuthenticatedUser { user_id })
}

/// Middleware that validates the token and adds the caller to request extensions
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, GateRejection> {
    let caller = resolve_identity(req.headers(), &authenticator).inspect_err(|e| {
        tracing::warn!(
            reason = %e,
            method = %req.method(),
            uri = %req.uri(),
            "Request rejected by auth gate"
        );
    })?;

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}
