use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::domain::validation::FieldError;
use crate::profile::errors::ProfileError;
use crate::user::errors::UserError;

pub mod current_user;
pub mod login;
pub mod profiles;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

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
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Body of the plain `{"msg": ...}` responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub msg: String,
}

impl MessageData {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400 with `{"errors": [...]}`
    Rejected(Vec<FieldError>),
    /// 400 with `{"msg": ...}`
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    /// 500; the detail is logged, never sent.
    InternalServerError(String),
}

impl ApiError {
    pub fn rejected(msg: impl std::fmt::Display) -> Self {
        ApiError::Rejected(vec![FieldError::general(msg)])
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Request body rejected");
        ApiError::rejected("Malformed request body")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Rejected(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(MessageData::new(msg))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(MessageData::new(msg))).into_response()
            }
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(MessageData::new(msg))).into_response()
            }
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageData::new("Server error")),
                )
                    .into_response()
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateUser(_) | UserError::InvalidCredentials => {
                ApiError::rejected(&err)
            }
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::InvalidUserId(_) => ApiError::BadRequest(err.to_string()),
            UserError::Hashing(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NoProfile(_) | ProfileError::NotFound(_) => {
                ApiError::BadRequest(err.to_string())
            }
            ProfileError::ExperienceNotFound(_) | ProfileError::EducationNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ProfileError::User(UserError::NotFound(_)) => {
                ApiError::Unauthorized("User no longer exists".to_string())
            }
            ProfileError::User(user_error) => ApiError::from(user_error),
            ProfileError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}
