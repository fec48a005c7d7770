use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::SecretError;

/// Argon2id hashing for account secrets.
///
/// New hashes use the default Argon2id parameters and a fresh salt each time.
/// Verification reads the parameters back out of the stored PHC string.
pub struct SecretHasher {
    argon2: Argon2<'static>,
}

impl SecretHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }

    /// Hash a plaintext secret into a PHC string.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, secret: &str) -> Result<String, SecretError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| SecretError::HashingFailed(e.to_string()))
    }

    /// Whether `secret` matches the stored PHC string.
    ///
    /// A mismatch is `Ok(false)`; only a stored value that cannot be checked
    /// at all is an error.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored value is not a usable PHC string
    pub fn verify(&self, secret: &str, stored: &str) -> Result<bool, SecretError> {
        let parsed = PasswordHash::new(stored).map_err(|e| {
            SecretError::VerificationFailed(format!("stored hash is not a PHC string: {e}"))
        })?;

        match self.argon2.verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(SecretError::VerificationFailed(e.to_string())),
        }
    }
}

impl Default for SecretHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_argon2id() {
        let hasher = SecretHasher::new();

        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();

        assert!(first.starts_with("$argon2id$v=19$"));
        assert!(!first.contains("secret1"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_only_the_original_secret_matches() {
        let hasher = SecretHasher::new();
        let stored = hasher.hash("secret1").unwrap();

        assert_eq!(hasher.verify("secret1", &stored).ok(), Some(true));
        assert_eq!(hasher.verify("Secret1", &stored).ok(), Some(false));
        assert_eq!(hasher.verify("", &stored).ok(), Some(false));
    }

    #[test]
    fn test_unparseable_stored_value_is_an_error() {
        let hasher = SecretHasher::new();

        let result = hasher.verify("secret1", "plaintext-from-a-bad-import");
        assert!(matches!(result, Err(SecretError::VerificationFailed(_))));
    }
}
