//! Argon2id password hashing.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
};

use wakehub_domain::error::WakeHubError;

/// Hashes and verifies passwords with Argon2id default parameters.
///
/// Produces PHC-format strings, so parameters and salts travel with the
/// hash and can be tightened later without a migration.
#[derive(Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::PasswordHash`] when hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, WakeHubError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| WakeHubError::PasswordHash(Box::new(err)))
    }

    /// Verify a password against a stored PHC string.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::PasswordHash`] when the stored hash cannot
    /// be parsed. A wrong password is `Ok(false)`, not an error.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, WakeHubError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|err| WakeHubError::PasswordHash(Box::new(err)))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_verify_correct_password() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("hunter2").unwrap();
        assert!(hasher.verify("hunter2", &hash).unwrap());
    }

    #[test]
    fn should_reject_wrong_password() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("hunter2").unwrap();
        assert!(!hasher.verify("hunter3", &hash).unwrap());
    }

    #[test]
    fn should_salt_each_hash_independently() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash("hunter2").unwrap();
        let b = hasher.hash("hunter2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn should_error_on_unparseable_stored_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("hunter2", "not-a-phc-string");
        assert!(matches!(result, Err(WakeHubError::PasswordHash(_))));
    }
}
