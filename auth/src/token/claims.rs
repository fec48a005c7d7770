use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload of an access token.
///
/// Only the registered claims the service relies on are carried: the subject
/// (user identifier) and the issuance/expiry window. All three are required;
/// a token missing any of them does not decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user, valid for `lifetime` starting at `issued_at`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `issued_at` - Start of the validity window
    /// * `lifetime` - Length of the validity window
    ///
    /// # Returns
    /// Claims with sub, iat and exp set
    pub fn for_user(user_id: impl ToString, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let expiration = issued_at + lifetime;

        Self {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the token is expired at the given instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
