use sha2::Digest;
use sha2::Sha256;

const GRAVATAR_BASE_URL: &str = "https://www.gravatar.com/avatar";

/// Gravatar URL for an e-mail address.
///
/// The address is trimmed and lowercased before hashing, so the result does
/// not depend on how the user typed it. Size 200px, rating "pg", and the
/// "mystery person" fallback image.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = hex::encode(Sha256::digest(normalized.as_bytes()));

    format!("{}/{}?s=200&r=pg&d=mm", GRAVATAR_BASE_URL, digest)
}
