use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::DisplayNameError;
use crate::user::errors::EmailError;
use crate::user::errors::SecretError;
use crate::user::errors::UserIdError;

/// Registered member of the network.
///
/// `secret_hash` never leaves the service; HTTP responses are built from
/// explicit projections that omit it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub email: EmailAddress,
    pub secret_hash: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Any non-blank text; surrounding whitespace is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a new display name.
    ///
    /// # Errors
    /// * `Empty` - Name is blank after trimming
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DisplayNameError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. The login key of
/// a user; unique across all users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string (surrounding whitespace is dropped)
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_string();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext secret awaiting hashing.
///
/// Debug output is redacted so the value cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    const MIN_LENGTH: usize = 6;

    /// Secret chosen at registration; must be at least 6 characters.
    ///
    /// # Errors
    /// * `Missing` - No secret supplied
    /// * `TooShort` - Fewer than 6 characters
    pub fn new(secret: Option<String>) -> Result<Self, SecretError> {
        let secret = secret.ok_or(SecretError::Missing)?;
        let length = secret.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(SecretError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(secret))
    }

    /// Secret presented at login; only its presence is checked.
    ///
    /// # Errors
    /// * `Missing` - No secret supplied
    pub fn presented(secret: Option<String>) -> Result<Self, SecretError> {
        secret.map(Self).ok_or(SecretError::Missing)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub secret: Secret,
}

impl RegisterUserCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `name` - Validated display name
    /// * `email` - Validated email address
    /// * `secret` - Plaintext secret (hashed by the service)
    pub fn new(name: DisplayName, email: EmailAddress, secret: Secret) -> Self {
        Self {
            name,
            email,
            secret,
        }
    }
}
