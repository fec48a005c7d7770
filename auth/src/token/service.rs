use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use super::errors::VerificationError;

/// Validity window of every issued token. Tokens are not renewable.
pub const TOKEN_LIFETIME_HOURS: i64 = 4;

/// Issues and verifies signed, time-boxed access tokens.
///
/// Tokens are HS256 JWTs whose subject is the user identifier. The signing
/// key is fixed for the lifetime of the service; there is no key rotation.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl TokenService {
    /// Create a token service with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Returns
    /// TokenService configured with HS256 and a 4 hour lifetime
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration or a vault, never from code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime: Duration::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for a user, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, user_id: impl ToString) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token whose validity window starts at `issued_at`.
    ///
    /// # Arguments
    /// * `user_id` - Subject of the token
    /// * `issued_at` - Start of the validity window
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_at(
        &self,
        user_id: impl ToString,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::for_user(user_id, issued_at, self.lifetime);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return the user identifier it carries.
    ///
    /// # Errors
    /// * `Invalid` - Signature mismatch, malformed token or missing claims
    /// * `Expired` - Validity window has passed
    pub fn verify(&self, token: &str) -> Result<String, VerificationError> {
        self.decode_claims(token).map(|claims| claims.sub)
    }

    /// Verify a token and return its full claims.
    ///
    /// # Errors
    /// * `Invalid` - Signature mismatch, malformed token or missing claims
    /// * `Expired` - Validity window has passed
    pub fn decode_claims(&self, token: &str) -> Result<Claims, VerificationError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => VerificationError::Expired,
                _ => VerificationError::Invalid(e.to_string()),
            })
    }
}
