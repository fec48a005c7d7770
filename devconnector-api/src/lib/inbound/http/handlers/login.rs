use auth::AuthenticationError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::register::TokenResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Secret;
use crate::domain::validation::FieldErrors;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;
    let (email, secret) = body.validate()?;

    let user = state
        .user_service
        .get_user_by_email(&email)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => {
                tracing::warn!(email = %email, "Login attempt for unknown email");
                ApiError::from(UserError::InvalidCredentials)
            }
            _ => ApiError::from(e),
        })?;

    let result = state
        .authenticator
        .authenticate(secret.expose(), &user.secret_hash, user.id)
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::warn!(user_id = %user.id, "Login attempt with wrong secret");
                ApiError::from(UserError::InvalidCredentials)
            }
            AuthenticationError::SecretError(err) => {
                ApiError::InternalServerError(format!("Secret verification failed: {err}"))
            }
            AuthenticationError::TokenError(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {err}"))
            }
        })?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData {
            token: result.access_token,
        },
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    #[serde(alias = "pass")]
    secret: Option<String>,
}

impl LoginRequest {
    fn validate(self) -> Result<(EmailAddress, Secret), ApiError> {
        let mut errors = FieldErrors::new();

        let email = errors.check("email", EmailAddress::new(self.email.unwrap_or_default()));
        let secret = errors.check("secret", Secret::presented(self.secret));

        match (email, secret) {
            (Some(email), Some(secret)) if errors.is_empty() => Ok((email, secret)),
            _ => Err(ApiError::Rejected(errors.into_inner())),
        }
    }
}
