use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email and secret
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `DuplicateUser` - Email is already registered
    /// * `Hashing` - Secret hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by login email.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError>;

    /// Retrieve multiple users by identifiers.
    ///
    /// # Returns
    /// Vector of found users (missing IDs are skipped without error)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_users_by_ids(&self, user_ids: &[UserId]) -> Result<Vec<User>, UserError>;
}

/// Persistence operations for the credential store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `DuplicateUser` - Store rejected the email as already present
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve multiple users by identifiers.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError>;

    /// Remove user from storage.
    ///
    /// # Returns
    /// Whether a record was removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<bool, UserError>;
}
