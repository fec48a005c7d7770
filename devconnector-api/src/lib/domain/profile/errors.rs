use thiserror::Error;

use crate::user::errors::UserError;

/// Error for profile input fields
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileFieldError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be a valid date (YYYY-MM-DD)")]
    InvalidDate(&'static str),
}

/// Error for sub-document identifier parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntryIdError {
    #[error("Invalid entry ID: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all profile-related operations
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    /// The authenticated caller has no profile yet.
    #[error("There is no profile for this user")]
    NoProfile(String),

    /// Public lookup of someone else's profile came up empty.
    #[error("Profile not found")]
    NotFound(String),

    #[error("Experience not found")]
    ExperienceNotFound(String),

    #[error("Education not found")]
    EducationNotFound(String),

    #[error("Owner lookup failed: {0}")]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
