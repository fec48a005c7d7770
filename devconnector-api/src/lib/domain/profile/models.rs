use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::profile::errors::EntryIdError;
use crate::profile::errors::ProfileFieldError;

/// Developer profile document, one per user.
///
/// Experience and education are embedded sub-document arrays kept newest
/// first.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: UserId,
    pub details: ProfileDetails,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Fresh profile for a user with no sub-documents.
    pub fn new(user_id: UserId, details: ProfileDetails) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            details,
            experience: Vec::new(),
            education: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Insert an experience entry at the front.
    pub fn add_experience(&mut self, entry: NewExperience) -> EntryId {
        let id = EntryId::new();
        self.experience.insert(
            0,
            Experience {
                id: id.0,
                title: entry.title,
                company: entry.company,
                location: entry.location,
                from: entry.from,
                to: entry.to,
                current: entry.current,
                description: entry.description,
            },
        );
        id
    }

    /// Remove the experience entry with this id, if present.
    pub fn remove_experience(&mut self, id: &EntryId) -> Option<Experience> {
        let position = self.experience.iter().position(|e| e.id == id.0)?;
        Some(self.experience.remove(position))
    }

    /// Insert an education entry at the front.
    pub fn add_education(&mut self, entry: NewEducation) -> EntryId {
        let id = EntryId::new();
        self.education.insert(
            0,
            Education {
                id: id.0,
                school: entry.school,
                degree: entry.degree,
                field_of_study: entry.field_of_study,
                from: entry.from,
                to: entry.to,
                current: entry.current,
                description: entry.description,
            },
        );
        id
    }

    /// Remove the education entry with this id, if present.
    pub fn remove_education(&mut self, id: &EntryId) -> Option<Education> {
        let position = self.education.iter().position(|e| e.id == id.0)?;
        Some(self.education.remove(position))
    }
}

/// Fields set by a profile upsert.
///
/// Optional fields left out of an upsert are cleared, not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDetails {
    pub status: String,
    pub skills: Vec<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub social: SocialLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    #[serde(rename = "fieldofstudy")]
    pub field_of_study: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Validated experience entry awaiting insertion
#[derive(Debug, Clone)]
pub struct NewExperience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Validated education entry awaiting insertion
#[derive(Debug, Clone)]
pub struct NewEducation {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Identifier of an experience or education entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an entry ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, EntryIdError> {
        Uuid::parse_str(s)
            .map(EntryId)
            .map_err(|e| EntryIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Public face of a profile owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOwner {
    pub id: UserId,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for ProfileOwner {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.as_str().to_string(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Profile joined with its owner's public fields
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedProfile {
    pub profile: Profile,
    pub owner: ProfileOwner,
}

/// Non-blank text for a required field.
///
/// # Errors
/// * `Required` - Value absent or blank
pub fn required_text(label: &'static str, value: Option<String>) -> Result<String, ProfileFieldError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ProfileFieldError::Required(label))
}

/// Blank optional text collapses to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a comma-separated skill list, trimming each entry and dropping blanks.
///
/// # Errors
/// * `Required` - No skill left after splitting
pub fn parse_skills(value: Option<String>) -> Result<Vec<String>, ProfileFieldError> {
    let skills: Vec<String> = value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect();

    if skills.is_empty() {
        return Err(ProfileFieldError::Required("Skills"));
    }
    Ok(skills)
}

/// Calendar date of a required date field.
///
/// # Errors
/// * `Required` - Value absent or blank
/// * `InvalidDate` - Not a `YYYY-MM-DD` date or RFC 3339 timestamp
pub fn required_date(label: &'static str, value: Option<String>) -> Result<NaiveDate, ProfileFieldError> {
    let raw = required_text(label, value)?;
    parse_date(&raw).ok_or(ProfileFieldError::InvalidDate(label))
}

/// Calendar date of an optional date field.
///
/// # Errors
/// * `InvalidDate` - Present but not a `YYYY-MM-DD` date or RFC 3339 timestamp
pub fn optional_date(
    label: &'static str,
    value: Option<String>,
) -> Result<Option<NaiveDate>, ProfileFieldError> {
    match optional_text(value) {
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or(ProfileFieldError::InvalidDate(label)),
        None => Ok(None),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|timestamp| timestamp.date_naive())
    })
}
