use crate::secret::SecretError;
use crate::secret::SecretHasher;
use crate::token::TokenError;
use crate::token::TokenService;
use crate::token::VerificationError;

/// Login and request-gate checks over the process-wide signing key.
///
/// Secrets are hashed at registration by whoever owns the credential store;
/// this type only checks them and deals in tokens.
pub struct Authenticator {
    secrets: SecretHasher,
    tokens: TokenService,
}

/// Token handed back to a client after a successful login.
pub struct AuthenticationResult {
    pub access_token: String,
}

/// Why a login did not produce a token.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Secret error: {0}")]
    SecretError(#[from] SecretError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    pub fn new(signing_key: &[u8]) -> Self {
        Self {
            secrets: SecretHasher::new(),
            tokens: TokenService::new(signing_key),
        }
    }

    /// Check a presented secret against the stored hash and, on a match,
    /// issue a token for `user_id`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Secret does not match
    /// * `SecretError` - Stored hash could not be checked
    /// * `TokenError` - Token signing failed
    pub fn authenticate(
        &self,
        secret: &str,
        stored_hash: &str,
        user_id: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.secrets.verify(secret, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(AuthenticationResult {
            access_token: self.tokens.issue(user_id)?,
        })
    }

    /// Token for an account whose credentials were just created.
    pub fn issue_token(&self, user_id: impl ToString) -> Result<String, TokenError> {
        self.tokens.issue(user_id)
    }

    /// Subject of a presented token.
    ///
    /// # Errors
    /// * `Invalid` - Signature mismatch or malformed token
    /// * `Expired` - Validity window has passed
    pub fn verify_token(&self, token: &str) -> Result<String, VerificationError> {
        self.tokens.verify(token)
    }

    pub fn token_service(&self) -> &TokenService {
        &self.tokens
    }
}
