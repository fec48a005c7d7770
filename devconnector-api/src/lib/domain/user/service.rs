use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    secret_hasher: auth::SecretHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            secret_hasher: auth::SecretHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        // Fast path; the store's unique constraint settles concurrent races.
        if self.repository.find_by_email(&command.email).await?.is_some() {
            tracing::info!(email = %command.email, "Registration rejected, email in use");
            return Err(UserError::DuplicateUser(command.email.to_string()));
        }

        let secret_hash = self.secret_hasher.hash(command.secret.expose())?;
        let avatar_url = auth::gravatar_url(command.email.as_str());

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            secret_hash,
            avatar_url: Some(avatar_url),
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound(email.to_string()))
    }

    async fn get_users_by_ids(&self, user_ids: &[UserId]) -> Result<Vec<User>, UserError> {
        self.repository.find_by_ids(user_ids).await
    }
}
