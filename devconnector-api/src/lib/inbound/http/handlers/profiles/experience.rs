use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ProfileResponseData;
use crate::domain::profile::models::optional_date;
use crate::domain::profile::models::optional_text;
use crate::domain::profile::models::required_date;
use crate::domain::profile::models::required_text;
use crate::domain::profile::models::EntryId;
use crate::domain::profile::models::NewExperience;
use crate::domain::validation::FieldErrors;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::profile::errors::ProfileError;

pub async fn add_experience(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    payload: Result<Json<ExperienceRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .profile_service
        .add_experience(&caller.user_id, body.try_into_entry()?)
        .await
        .map_err(ApiError::from)
        .map(|ref owned| ApiSuccess::new(StatusCode::OK, owned.into()))
}

pub async fn remove_experience(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(exp_id): Path<String>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let entry_id =
        EntryId::from_string(&exp_id).map_err(|_| ProfileError::ExperienceNotFound(exp_id.clone()))?;

    state
        .profile_service
        .remove_experience(&caller.user_id, &entry_id)
        .await
        .map_err(ApiError::from)
        .map(|ref owned| ApiSuccess::new(StatusCode::OK, owned.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExperienceRequest {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    from: Option<String>,
    to: Option<String>,
    current: Option<bool>,
    description: Option<String>,
}

impl ExperienceRequest {
    fn try_into_entry(self) -> Result<NewExperience, ApiError> {
        let mut errors = FieldErrors::new();

        let title = errors.check("title", required_text("Title", self.title));
        let company = errors.check("company", required_text("Company", self.company));
        let from = errors.check("from", required_date("From date", self.from));
        let to = errors.check("to", optional_date("To date", self.to));

        let (Some(title), Some(company), Some(from), Some(to)) = (title, company, from, to) else {
            return Err(ApiError::Rejected(errors.into_inner()));
        };

        let current = self.current.unwrap_or(false);

        Ok(NewExperience {
            title,
            company,
            location: optional_text(self.location),
            from,
            to: if current { None } else { to },
            current,
            description: optional_text(self.description),
        })
    }
}
