//! Authentication primitives for the DevConnector services.
//!
//! Provides:
//! - Secret hashing (Argon2id, random salt per hash)
//! - Access token issuance and verification (HS256, 4 hour lifetime)
//! - Authentication coordination
//! - Avatar derivation from an e-mail address
//!
//! # Examples
//!
//! ## Secret Hashing
//! ```
//! use auth::SecretHasher;
//!
//! let hasher = SecretHasher::new();
//! let hash = hasher.hash("secret1").unwrap();
//! assert!(hasher.verify("secret1", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let token = tokens.issue("user123").unwrap();
//! assert_eq!(tokens.verify(&token).unwrap(), "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use auth::SecretHasher;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: the credential store keeps only the hash
//! let hash = SecretHasher::new().hash("secret1").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("secret1", &hash, "user123").unwrap();
//!
//! // Gate: resolve the subject
//! let subject = auth.verify_token(&result.access_token).unwrap();
//! assert_eq!(subject, "user123");
//! ```

pub mod authenticator;
pub mod avatar;
pub mod secret;
pub mod token;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use avatar::gravatar_url;
pub use secret::SecretError;
pub use secret::SecretHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenService;
pub use token::VerificationError;
pub use token::TOKEN_LIFETIME_HOURS;
