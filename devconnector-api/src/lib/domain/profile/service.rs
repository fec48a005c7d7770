use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::profile::models::EntryId;
use crate::domain::profile::models::NewEducation;
use crate::domain::profile::models::NewExperience;
use crate::domain::profile::models::OwnedProfile;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileDetails;
use crate::domain::profile::models::ProfileOwner;
use crate::domain::user::models::UserId;
use crate::profile::errors::ProfileError;
use crate::profile::ports::ProfileRepository;
use crate::profile::ports::ProfileServicePort;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Domain service implementation for profile operations.
pub struct ProfileService<PR, UR>
where
    PR: ProfileRepository,
    UR: UserRepository,
{
    profiles: Arc<PR>,
    users: Arc<UR>,
}

impl<PR, UR> ProfileService<PR, UR>
where
    PR: ProfileRepository,
    UR: UserRepository,
{
    /// Create a new profile service with injected dependencies.
    ///
    /// # Arguments
    /// * `profiles` - Profile document store
    /// * `users` - Credential store, used to resolve owners and delete accounts
    pub fn new(profiles: Arc<PR>, users: Arc<UR>) -> Self {
        Self { profiles, users }
    }

    async fn owner_of(&self, user_id: &UserId) -> Result<ProfileOwner, ProfileError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|user| ProfileOwner::from(&user))
            .ok_or_else(|| ProfileError::User(UserError::NotFound(user_id.to_string())))
    }

    async fn with_owner(&self, profile: Profile) -> Result<OwnedProfile, ProfileError> {
        let owner = self.owner_of(&profile.user_id).await?;
        Ok(OwnedProfile { profile, owner })
    }

    async fn own_profile(&self, user_id: &UserId) -> Result<Profile, ProfileError> {
        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ProfileError::NoProfile(user_id.to_string()))
    }
}

#[async_trait]
impl<PR, UR> ProfileServicePort for ProfileService<PR, UR>
where
    PR: ProfileRepository,
    UR: UserRepository,
{
    async fn upsert_profile(
        &self,
        user_id: &UserId,
        details: ProfileDetails,
    ) -> Result<OwnedProfile, ProfileError> {
        let owner = self.owner_of(user_id).await?;
        let profile = self
            .profiles
            .upsert(Profile::new(*user_id, details))
            .await?;

        tracing::info!(user_id = %user_id, profile_id = %profile.id, "Profile saved");

        Ok(OwnedProfile { profile, owner })
    }

    async fn get_own_profile(&self, user_id: &UserId) -> Result<OwnedProfile, ProfileError> {
        let profile = self.own_profile(user_id).await?;
        self.with_owner(profile).await
    }

    async fn list_profiles(&self) -> Result<Vec<OwnedProfile>, ProfileError> {
        let profiles = self.profiles.list_all().await?;
        let owner_ids: Vec<UserId> = profiles.iter().map(|p| p.user_id).collect();

        let owners: HashMap<UserId, ProfileOwner> = self
            .users
            .find_by_ids(&owner_ids)
            .await?
            .iter()
            .map(|user| (user.id, ProfileOwner::from(user)))
            .collect();

        Ok(profiles
            .into_iter()
            .filter_map(|profile| {
                let owner = owners.get(&profile.user_id)?.clone();
                Some(OwnedProfile { profile, owner })
            })
            .collect())
    }

    async fn get_profile_by_user(&self, user_id: &UserId) -> Result<OwnedProfile, ProfileError> {
        let profile = self
            .profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(user_id.to_string()))?;

        self.with_owner(profile).await.map_err(|e| match e {
            ProfileError::User(UserError::NotFound(id)) => ProfileError::NotFound(id),
            other => other,
        })
    }

    async fn delete_account(&self, user_id: &UserId) -> Result<(), ProfileError> {
        let had_profile = self.profiles.delete_by_user(user_id).await?;
        let had_user = self.users.delete(user_id).await?;

        tracing::info!(
            user_id = %user_id,
            had_profile,
            had_user,
            "Account deleted"
        );

        Ok(())
    }

    async fn add_experience(
        &self,
        user_id: &UserId,
        entry: NewExperience,
    ) -> Result<OwnedProfile, ProfileError> {
        let mut profile = self.own_profile(user_id).await?;
        let entry_id = profile.add_experience(entry);

        let profile = self.profiles.save_entries(profile).await?;
        tracing::debug!(user_id = %user_id, entry_id = %entry_id, "Experience added");

        self.with_owner(profile).await
    }

    async fn remove_experience(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<OwnedProfile, ProfileError> {
        let mut profile = self.own_profile(user_id).await?;
        profile
            .remove_experience(entry_id)
            .ok_or_else(|| ProfileError::ExperienceNotFound(entry_id.to_string()))?;

        let profile = self.profiles.save_entries(profile).await?;
        self.with_owner(profile).await
    }

    async fn add_education(
        &self,
        user_id: &UserId,
        entry: NewEducation,
    ) -> Result<OwnedProfile, ProfileError> {
        let mut profile = self.own_profile(user_id).await?;
        let entry_id = profile.add_education(entry);

        let profile = self.profiles.save_entries(profile).await?;
        tracing::debug!(user_id = %user_id, entry_id = %entry_id, "Education added");

        self.with_owner(profile).await
    }

    async fn remove_education(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<OwnedProfile, ProfileError> {
        let mut profile = self.own_profile(user_id).await?;
        profile
            .remove_education(entry_id)
            .ok_or_else(|| ProfileError::EducationNotFound(entry_id.to_string()))?;

        let profile = self.profiles.save_entries(profile).await?;
        self.with_owner(profile).await
    }
}
