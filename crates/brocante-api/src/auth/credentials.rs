// Credential engine: salt/token generation and password digests
// Decision: digest format is base64(SHA-256(password || salt)); the
// (password, salt) -> digest seam is the single place to swap the KDF

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

const SALT_LENGTH: usize = 16;
const TOKEN_LENGTH: usize = 16;

/// Per-account random salt
pub fn generate_salt() -> String {
    random_opaque(SALT_LENGTH)
}

/// Long-lived opaque bearer token, unique with overwhelming probability
pub fn generate_token() -> String {
    random_opaque(TOKEN_LENGTH)
}

// ThreadRng is a CSPRNG, suitable for security tokens
fn random_opaque(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// One-way digest of password and salt
pub fn hash_password(password: &str, salt: &str) -> String {
    let digest = Sha256::digest(format!("{password}{salt}").as_bytes());
    BASE64.encode(digest)
}

/// Digest equality is the sole authentication check
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    hash_password(password, salt) == stored_hash
}
