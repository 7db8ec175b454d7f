//! Password hashing with Argon2id.
//!
//! The credential store turns raw passwords into PHC strings (salt and cost
//! embedded) and checks candidates against them. A mismatch is an ordinary
//! outcome, so `verify` returns `bool` rather than an error.

use crate::error::AuthError;
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Password hasher configuration.
///
/// Defaults to the OWASP 2024 Argon2id parameters:
/// - Memory: 19456 KiB (19 MiB)
/// - Iterations: 2
/// - Parallelism: 1
#[derive(Debug, Clone)]
pub struct CredentialStore {
    params: Params,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Create a credential store with the OWASP-recommended parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: Params::DEFAULT,
        }
    }

    /// Create a credential store with custom parameters.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HashingFailed` if the parameters are out of range.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::HashingFailed(format!("Invalid parameters: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HashingFailed` only on RNG or library failure.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingFailed(format!("Hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Check a candidate password against a stored PHC hash.
    ///
    /// The salt and cost are read from `stored_hash`, so hashes produced under
    /// older parameters still verify. A malformed hash never matches.
    #[must_use]
    pub fn verify(&self, stored_hash: &str, candidate: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(stored_hash) else {
            tracing::debug!("Stored password hash is not a valid PHC string");
            return false;
        };

        self.argon2()
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Hash a password with the default `CredentialStore`.
///
/// # Example
///
/// ```rust
/// use tribble_auth::hash_password;
///
/// let hash = hash_password("my-secure-password").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    CredentialStore::new().hash(password)
}

/// Verify a candidate against a stored hash with the default `CredentialStore`.
///
/// # Example
///
/// ```rust
/// use tribble_auth::{hash_password, verify_password};
///
/// let hash = hash_password("my-password").unwrap();
/// assert!(verify_password(&hash, "my-password"));
/// assert!(!verify_password(&hash, "wrong-password"));
/// ```
#[must_use]
pub fn verify_password(stored_hash: &str, candidate: &str) -> bool {
    CredentialStore::new().verify(stored_hash, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Small parameters keep the suite fast; the algorithm is the same.
    fn fast_store() -> CredentialStore {
        CredentialStore::with_params(4096, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_password_returns_argon2id() {
        let hash = hash_password("test-password").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_hash_format_contains_default_params() {
        let hash = hash_password("test").unwrap();

        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=19456"));
        assert!(hash.contains("t=2"));
        assert!(hash.contains("p=1"));
    }

    #[test]
    fn test_verify_correct_password() {
        let store = fast_store();
        let hash = store.hash("secret123").unwrap();

        assert!(store.verify(&hash, "secret123"));
    }

    #[test]
    fn test_verify_incorrect_password() {
        let store = fast_store();
        let hash = store.hash("secret123").unwrap();

        assert!(!store.verify(&hash, "wrongpass"));
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch_not_an_error() {
        let store = fast_store();

        assert!(!store.verify("not-a-valid-hash", "password"));
        assert!(!store.verify("", "password"));
        assert!(!store.verify("$argon2id$v=19$m=4096,t=1,p=1$truncated", "password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let store = fast_store();
        let hash1 = store.hash("same-password").unwrap();
        let hash2 = store.hash("same-password").unwrap();

        assert_ne!(hash1, hash2);
        assert!(store.verify(&hash1, "same-password"));
        assert!(store.verify(&hash2, "same-password"));
    }

    #[test]
    fn test_verify_uses_cost_from_stored_hash() {
        // A hash made under other parameters still verifies with the default store.
        let hash = fast_store().hash("portable").unwrap();

        assert!(verify_password(&hash, "portable"));
        assert!(!verify_password(&hash, "Portable"));
    }

    #[test]
    fn test_distinct_passwords_never_cross_verify() {
        let store = fast_store();
        let passwords = ["", "a", "secret123", "secret1234", "пароль日本語🔐"];

        for p1 in passwords {
            let hash = store.hash(p1).unwrap();
            for p2 in passwords {
                assert_eq!(store.verify(&hash, p2), p1 == p2, "{p1:?} vs {p2:?}");
            }
        }
    }

    #[test]
    fn test_long_password() {
        let store = fast_store();
        let password = "a".repeat(1000);
        let hash = store.hash(&password).unwrap();

        assert!(store.verify(&hash, &password));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = CredentialStore::with_params(0, 0, 0);
        assert!(matches!(result, Err(AuthError::HashingFailed(_))));
    }
}
