//! Credential hashing gate.
//!
//! Every save passes the credential through [`ensure_hashed`]: values that
//! already carry a recognized hashed-secret marker are stored byte-for-byte,
//! anything else is replaced with its Argon2id PHC hash. The gate rather than
//! the caller decides, so a record can be saved any number of times without
//! double-hashing.

use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::errors::RegistryError;

/// Recognized hashed-secret markers: the PHC/modular-crypt prefixes of the
/// three schemes the registry accepts as already-hashed. `$argon2` is what
/// this module produces; the other two keep imported pbkdf2-sha256 and bcrypt
/// hashes from being hashed a second time.
pub const HASH_MARKERS: [&str; 3] = ["$argon2", "$pbkdf2-sha256$", "$2b$"];

/// Whether `secret` already carries one of the recognized markers.
pub fn is_marked_hash(secret: &str) -> bool {
    HASH_MARKERS.iter().any(|marker| secret.starts_with(marker))
}

/// Hash a plaintext secret with Argon2id, salted from the OS RNG, producing
/// a PHC string (starts with `$argon2id$`).
pub fn hash_secret(secret: &str) -> Result<String, RegistryError> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| RegistryError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// The gate itself. An empty credential is passed through untouched (an
/// account without a usable secret), as is anything already marked.
pub fn ensure_hashed(secret: &str) -> Result<String, RegistryError> {
    if secret.is_empty() || is_marked_hash(secret) {
        Ok(secret.to_owned())
    } else {
        hash_secret(secret)
    }
}

/// Verify a plaintext against a stored PHC string.
pub fn verify_secret(secret: &str, stored: &str) -> Result<bool, RegistryError> {
    let parsed = PasswordHash::new(stored).map_err(|e| RegistryError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok())
}
