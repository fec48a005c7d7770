use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Name is required")]
    Empty,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Please include a valid email")]
    InvalidFormat(String),
}

/// Error for Secret policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Password is required")]
    Missing,

    #[error("Please enter a password with {min} or more characters")]
    TooShort { min: usize, actual: usize },
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    // Domain-level errors
    #[error("User exists already.")]
    DuplicateUser(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Secret hashing failed: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}

impl From<auth::SecretError> for UserError {
    fn from(err: auth::SecretError) -> Self {
        UserError::Hashing(err.to_string())
    }
}
