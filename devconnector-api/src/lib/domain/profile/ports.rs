use async_trait::async_trait;

use crate::domain::profile::models::EntryId;
use crate::domain::profile::models::NewEducation;
use crate::domain::profile::models::NewExperience;
use crate::domain::profile::models::OwnedProfile;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileDetails;
use crate::domain::user::models::UserId;
use crate::profile::errors::ProfileError;

/// Port for profile domain service operations.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Create the caller's profile, or replace its fields if it exists.
    ///
    /// Sub-document arrays survive an update untouched.
    ///
    /// # Errors
    /// * `User` - Owner no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn upsert_profile(
        &self,
        user_id: &UserId,
        details: ProfileDetails,
    ) -> Result<OwnedProfile, ProfileError>;

    /// Profile of the authenticated caller.
    ///
    /// # Errors
    /// * `NoProfile` - Caller has not created a profile
    /// * `DatabaseError` - Database operation failed
    async fn get_own_profile(&self, user_id: &UserId) -> Result<OwnedProfile, ProfileError>;

    /// All profiles whose owner still exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_profiles(&self) -> Result<Vec<OwnedProfile>, ProfileError>;

    /// Public lookup of a user's profile.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `DatabaseError` - Database operation failed
    async fn get_profile_by_user(&self, user_id: &UserId) -> Result<OwnedProfile, ProfileError>;

    /// Remove the caller's profile and then the caller's user record.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_account(&self, user_id: &UserId) -> Result<(), ProfileError>;

    /// Prepend an experience entry to the caller's profile.
    ///
    /// # Errors
    /// * `NoProfile` - Caller has not created a profile
    /// * `DatabaseError` - Database operation failed
    async fn add_experience(
        &self,
        user_id: &UserId,
        entry: NewExperience,
    ) -> Result<OwnedProfile, ProfileError>;

    /// Remove one experience entry from the caller's profile.
    ///
    /// # Errors
    /// * `NoProfile` - Caller has not created a profile
    /// * `ExperienceNotFound` - No entry with this id
    /// * `DatabaseError` - Database operation failed
    async fn remove_experience(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<OwnedProfile, ProfileError>;

    /// Prepend an education entry to the caller's profile.
    ///
    /// # Errors
    /// * `NoProfile` - Caller has not created a profile
    /// * `DatabaseError` - Database operation failed
    async fn add_education(
        &self,
        user_id: &UserId,
        entry: NewEducation,
    ) -> Result<OwnedProfile, ProfileError>;

    /// Remove one education entry from the caller's profile.
    ///
    /// # Errors
    /// * `NoProfile` - Caller has not created a profile
    /// * `EducationNotFound` - No entry with this id
    /// * `DatabaseError` - Database operation failed
    async fn remove_education(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<OwnedProfile, ProfileError>;
}

/// Persistence operations for profile documents.
#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    /// Insert the profile, or overwrite the details of the owner's existing one.
    ///
    /// On conflict the stored id, creation time and sub-document arrays are
    /// kept.
    ///
    /// # Returns
    /// Profile as stored after the write
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn upsert(&self, profile: Profile) -> Result<Profile, ProfileError>;

    /// Retrieve the profile owned by a user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileError>;

    /// Retrieve all profiles, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Profile>, ProfileError>;

    /// Replace the sub-document arrays of an existing profile.
    ///
    /// # Errors
    /// * `NoProfile` - Profile no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn save_entries(&self, profile: Profile) -> Result<Profile, ProfileError>;

    /// Remove the profile owned by a user.
    ///
    /// # Returns
    /// Whether a profile was removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, ProfileError>;
}
