//! Secure password hashing and verification using Argon2id.
//!
//! The hashing and verification methods are designed for use in HTTP
//! handlers and return the handler error type directly.

use argon2::password_hash::Error as ArgonError;
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};

use crate::handler::{ErrorKind, Result};

/// Target identifier for password hashing service logging and error reporting.
const TRACING_TARGET: &str = "campline_server::service::password_hasher";

/// Secure password hashing and verification service using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a new instance of the [`PasswordHasher`] service.
    pub fn new() -> Self {
        let argon2 = Argon2::default();
        Self { argon2 }
    }

    /// Hashes a password using Argon2id with a cryptographically secure random salt.
    ///
    /// The returned hash string includes all necessary parameters and the salt,
    /// making it suitable for long-term storage in a database.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InternalServerError` if salt generation or the
    /// hashing operation fails.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let password_hash = self
            .argon2
            .hash_password(password.as_bytes())
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing operation failed"
                );

                ErrorKind::InternalServerError
                    .with_message("Password processing failed")
                    .with_resource("authentication")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored hash.
    ///
    /// Uses timing-safe comparison and does not leak why verification failed.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Unauthorized` for incorrect passwords and
    /// `ErrorKind::InternalServerError` for invalid hash formats or system
    /// errors.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %e,
                "Invalid password hash format provided"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication system temporarily unavailable")
                .with_resource("authentication")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(()),
            Err(ArgonError::PasswordInvalid) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    "Password verification failed: incorrect password provided"
                );

                Err(ErrorKind::Unauthorized
                    .with_message("Authentication failed")
                    .with_resource("authentication"))
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "Password verification system error"
                );

                Err(ErrorKind::InternalServerError
                    .with_message("Authentication temporarily unavailable")
                    .with_resource("authentication"))
            }
        }
    }

    /// Performs a dummy password verification to maintain consistent timing.
    ///
    /// Used when an account doesn't exist to prevent timing attacks that
    /// could reveal which accounts exist in the system. Always returns false
    /// but performs real cryptographic work.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        use rand::RngExt;

        let password_len = rand::random_range(16..32);
        let dummy_password: String = (0..password_len)
            .map(|_| rand::rng().sample(rand::distr::Alphanumeric) as char)
            .collect();

        // Hash the dummy password and verify, this will always fail
        // but takes the same time as a real verification
        if let Ok(dummy_hash) = self.hash_password(&dummy_password) {
            let _ = self.verify_password(password, &dummy_hash);
        }

        false
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
    fn hash_and_verify_password() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let password = "secure_password_123";
        let hash = hasher.hash_password(password)?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password(password, &hash).is_ok());
        assert!(hasher.verify_password("wrong_password", &hash).is_err());

        Ok(())
    }

    #[test]
    fn hash_produces_unique_salts() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let password = "test_password";

        let hash1 = hasher.hash_password(password)?;
        let hash2 = hasher.hash_password(password)?;

        assert_ne!(hash1, hash2);
        assert!(hasher.verify_password(password, &hash1).is_ok());
        assert!(hasher.verify_password(password, &hash2).is_ok());

        Ok(())
    }

    #[test]
    fn wrong_password_maps_to_unauthorized() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("correct_password")?;

        let error = hasher
            .verify_password("wrong_password", &hash)
            .expect_err("wrong password must fail");
        assert_eq!(error.kind(), ErrorKind::Unauthorized);

        Ok(())
    }

    #[test]
    fn invalid_hash_maps_to_internal_error() {
        let hasher = PasswordHasher::new();

        let error = hasher
            .verify_password("password", "not_a_valid_hash")
            .expect_err("invalid hash must fail");
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn dummy_verification_always_fails() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_dummy_password("any_password"));
    }
}
