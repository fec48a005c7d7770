use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Secret;
use crate::domain::validation::FieldErrors;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;
    let command = body.try_into_command()?;

    let user = state.user_service.register(command).await?;

    let token = state
        .authenticator
        .issue_token(user.id)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {e}")))?;

    Ok(ApiSuccess::new(StatusCode::OK, TokenResponseData { token }))
}

/// HTTP request body for registration (raw JSON)
///
/// Every field is optional at the wire level so that missing fields surface
/// as field errors rather than a rejected body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: Option<String>,
    email: Option<String>,
    #[serde(alias = "pass")]
    secret: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ApiError> {
        let mut errors = FieldErrors::new();

        let name = errors.check("name", DisplayName::new(self.name.unwrap_or_default()));
        let email = errors.check("email", EmailAddress::new(self.email.unwrap_or_default()));
        let secret = errors.check("secret", Secret::new(self.secret));

        match (name, email, secret) {
            (Some(name), Some(email), Some(secret)) if errors.is_empty() => {
                Ok(RegisterUserCommand::new(name, email, secret))
            }
            _ => Err(ApiError::Rejected(errors.into_inner())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::FieldError;

    #[test]
    fn test_all_field_errors_are_reported() {
        let request = RegisterRequest {
            name: Some("  ".to_string()),
            email: Some("not-an-email".to_string()),
            secret: Some("12345".to_string()),
        };

        let error = request.try_into_command().unwrap_err();
        assert_eq!(
            error,
            ApiError::Rejected(vec![
                FieldError::new("name", "Name is required"),
                FieldError::new("email", "Please include a valid email"),
                FieldError::new("secret", "Please enter a password with 6 or more characters"),
            ])
        );
    }

    #[test]
    fn test_pass_alias_is_accepted() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@x.com","pass":"abcdef"}"#,
        )
        .unwrap();

        let command = request.try_into_command().unwrap();
        assert_eq!(command.secret.expose(), "abcdef");
        assert_eq!(command.email.as_str(), "ada@x.com");
    }
}
