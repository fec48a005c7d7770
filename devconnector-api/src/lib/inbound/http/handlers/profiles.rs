use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::profile::models::Education;
use crate::domain::profile::models::Experience;
use crate::domain::profile::models::OwnedProfile;
use crate::domain::profile::models::SocialLinks;

pub mod delete_account;
pub mod education;
pub mod experience;
pub mod get_own_profile;
pub mod get_profile_by_user;
pub mod list_profiles;
pub mod upsert_profile;

/// Profile document joined with its owner's public fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub id: String,
    pub user: OwnerData,
    pub status: String,
    pub skills: Vec<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: SocialLinks,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerData {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
}

impl From<&OwnedProfile> for ProfileResponseData {
    fn from(owned: &OwnedProfile) -> Self {
        let profile = &owned.profile;
        let details = &profile.details;

        Self {
            id: profile.id.to_string(),
            user: OwnerData {
                id: owned.owner.id.to_string(),
                name: owned.owner.name.clone(),
                avatar: owned.owner.avatar_url.clone(),
            },
            status: details.status.clone(),
            skills: details.skills.clone(),
            company: details.company.clone(),
            website: details.website.clone(),
            location: details.location.clone(),
            bio: details.bio.clone(),
            githubusername: details.github_username.clone(),
            social: details.social.clone(),
            experience: profile.experience.clone(),
            education: profile.education.clone(),
            date: profile.created_at,
        }
    }
}
