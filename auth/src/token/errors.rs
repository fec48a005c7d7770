use thiserror::Error;

/// Error raised while signing a token.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Reason a presented token was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// Signature mismatch, malformed structure or missing claims.
    #[error("Token is invalid: {0}")]
    Invalid(String),

    /// Signature is good but the validity window has passed.
    #[error("Token is expired")]
    Expired,
}
