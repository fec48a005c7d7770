use thiserror::Error;

/// Error type for secret hashing operations.
#[derive(Debug, Clone, Error)]
pub enum SecretError {
    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),

    #[error("Secret verification failed: {0}")]
    VerificationFailed(String),
}
