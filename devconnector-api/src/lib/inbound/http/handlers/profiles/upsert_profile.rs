use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ProfileResponseData;
use crate::domain::profile::models::optional_text;
use crate::domain::profile::models::parse_skills;
use crate::domain::profile::models::required_text;
use crate::domain::profile::models::ProfileDetails;
use crate::domain::profile::models::SocialLinks;
use crate::domain::validation::FieldErrors;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn upsert_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .profile_service
        .upsert_profile(&caller.user_id, body.try_into_details()?)
        .await
        .map_err(ApiError::from)
        .map(|ref owned| ApiSuccess::new(StatusCode::OK, owned.into()))
}

/// HTTP request body for creating or updating a profile
///
/// `skills` is a comma-separated list; social links arrive as top-level
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileRequest {
    status: Option<String>,
    skills: Option<String>,
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    githubusername: Option<String>,
    youtube: Option<String>,
    twitter: Option<String>,
    facebook: Option<String>,
    linkedin: Option<String>,
    instagram: Option<String>,
}

impl ProfileRequest {
    fn try_into_details(self) -> Result<ProfileDetails, ApiError> {
        let mut errors = FieldErrors::new();

        let status = errors.check("status", required_text("Status", self.status));
        let skills = errors.check("skills", parse_skills(self.skills));

        let (Some(status), Some(skills)) = (status, skills) else {
            return Err(ApiError::Rejected(errors.into_inner()));
        };

        Ok(ProfileDetails {
            status,
            skills,
            company: optional_text(self.company),
            website: optional_text(self.website),
            location: optional_text(self.location),
            bio: optional_text(self.bio),
            github_username: optional_text(self.githubusername),
            social: SocialLinks {
                youtube: optional_text(self.youtube),
                twitter: optional_text(self.twitter),
                facebook: optional_text(self.facebook),
                linkedin: optional_text(self.linkedin),
                instagram: optional_text(self.instagram),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::FieldError;

    #[test]
    fn test_missing_status_and_skills() {
        let error = ProfileRequest::default().try_into_details().unwrap_err();
        assert_eq!(
            error,
            ApiError::Rejected(vec![
                FieldError::new("status", "Status is required"),
                FieldError::new("skills", "Skills is required"),
            ])
        );
    }

    #[test]
    fn test_details_from_request() {
        let request: ProfileRequest = serde_json::from_str(
            r#"{"status":"Developer","skills":"rust, sql","twitter":"@ada","bio":"  "}"#,
        )
        .unwrap();

        let details = request.try_into_details().unwrap();
        assert_eq!(details.skills, vec!["rust".to_string(), "sql".to_string()]);
        assert_eq!(details.social.twitter.as_deref(), Some("@ada"));
        assert_eq!(details.bio, None);
    }
}
