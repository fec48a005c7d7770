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
use crate::domain::profile::models::NewEducation;
use crate::domain::validation::FieldErrors;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::profile::errors::ProfileError;

pub async fn add_education(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    payload: Result<Json<EducationRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .profile_service
        .add_education(&caller.user_id, body.try_into_entry()?)
        .await
        .map_err(ApiError::from)
        .map(|ref owned| ApiSuccess::new(StatusCode::OK, owned.into()))
}

pub async fn remove_education(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(edu_id): Path<String>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let entry_id =
        EntryId::from_string(&edu_id).map_err(|_| ProfileError::EducationNotFound(edu_id.clone()))?;

    state
        .profile_service
        .remove_education(&caller.user_id, &entry_id)
        .await
        .map_err(ApiError::from)
        .map(|ref owned| ApiSuccess::new(StatusCode::OK, owned.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EducationRequest {
    school: Option<String>,
    degree: Option<String>,
    fieldofstudy: Option<String>,
    from: Option<String>,
    to: Option<String>,
    current: Option<bool>,
    description: Option<String>,
}

impl EducationRequest {
    fn try_into_entry(self) -> Result<NewEducation, ApiError> {
        let mut errors = FieldErrors::new();

        let school = errors.check("school", required_text("School", self.school));
        let degree = errors.check("degree", required_text("Degree", self.degree));
        let field_of_study = errors.check(
            "fieldofstudy",
            required_text("Field of study", self.fieldofstudy),
        );
        let from = errors.check("from", required_date("From date", self.from));
        let to = errors.check("to", optional_date("To date", self.to));

        let (Some(school), Some(degree), Some(field_of_study), Some(from), Some(to)) =
            (school, degree, field_of_study, from, to)
        else {
            return Err(ApiError::Rejected(errors.into_inner()));
        };

        let current = self.current.unwrap_or(false);

        Ok(NewEducation {
            school,
            degree,
            field_of_study,
            from,
            to: if current { None } else { to },
            current,
            description: optional_text(self.description),
        })
    }
}
