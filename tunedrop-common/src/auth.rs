//! Password hashing primitives
//!
//! Each user gets a random per-user salt; the stored hash is
//! SHA-256 over salt + password, hex encoded. The `users` table stores
//! `password_hash` and `password_salt` as separate columns.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a random 16-byte salt, hex encoded
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Hash a password with the given salt
///
/// Returns 64 hex characters (SHA-256 of salt concatenated with password).
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verify a password against a stored salt and hash
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    hash_password(password, salt) == expected_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salt_is_random_hex() {
        let a = generate_salt();
        let b = generate_salt();

        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b, "two salts should not collide");
    }

    #[test]
    fn test_hash_round_trip() {
        let salt = generate_salt();
        let hash = hash_password("secret1", &salt);

        assert_eq!(hash.len(), 64);
        assert!(verify_password("secret1", &salt, &hash));
        assert!(!verify_password("secret2", &salt, &hash));
    }

    #[test]
    fn test_same_password_different_salt_differs() {
        let salt_a = generate_salt();
        let salt_b = generate_salt();

        assert_ne!(
            hash_password("secret1", &salt_a),
            hash_password("secret1", &salt_b)
        );
    }
}
