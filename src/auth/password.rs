/// Password Hashing and Verification
///
/// Passwords are hashed with bcrypt at a fixed cost. The stored string
/// carries algorithm, cost, salt and digest, so verification needs nothing
/// besides the hash itself.

use bcrypt::{hash, verify, DEFAULT_COST};
use sha2::{Digest, Sha256};

use crate::error::HashingError;

/// bcrypt ignores everything past this many bytes of input
const BCRYPT_MAX_INPUT: usize = 72;

/// Hash a password using bcrypt
///
/// Empty and very long passwords are accepted.
///
/// # Errors
/// Returns `HashingError` only if bcrypt itself fails (e.g. no entropy for the salt)
pub fn hash_password(password: &str) -> Result<String, HashingError> {
    hash(bcrypt_input(password), DEFAULT_COST).map_err(|e| HashingError(e.to_string()))
}

/// Verify a password against its hash
///
/// Returns `Ok(false)` on mismatch.
///
/// # Errors
/// Returns `HashingError` if `hash` is not a well-formed bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, HashingError> {
    verify(bcrypt_input(password), hash).map_err(|e| HashingError(e.to_string()))
}

/// Long passwords are digested first so that no two of them share a hash
/// just because they share a 72-byte prefix.
fn bcrypt_input(password: &str) -> String {
    if password.len() > BCRYPT_MAX_INPUT {
        format!("{:x}", Sha256::digest(password.as_bytes()))
    } else {
        password.to_string()
    }
}
