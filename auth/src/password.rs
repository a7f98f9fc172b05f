use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

/// One-way password hashing, Argon2id with a fresh random salt per hash.
///
/// Hashes are stored and compared in PHC string format, so parameters can
/// change between releases without invalidating existing credentials.
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or salt
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored PHC hash.
    ///
    /// Returns `Ok(false)` for a wrong password; errors only when the stored
    /// hash itself is unparseable.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::VerificationFailed(format!("Invalid hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("hunter2!").expect("hashing failed");

        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("hunter2!", &hash).expect("verify failed"));
        assert!(!hasher.verify("hunter3!", &hash).expect("verify failed"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let hasher = PasswordHasher::new();
        let first = hasher.hash("hunter2!").expect("hashing failed");
        let second = hasher.hash("hunter2!").expect("hashing failed");

        // Random salt per hash
        assert_ne!(first, second);
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("hunter2!", "not-a-phc-string").is_err());
    }
}
