//! Password hashing and verification (Argon2id)

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use booking_core::DomainError;
use rand::rngs::OsRng;

use crate::error::AppError;

const MIN_PASSWORD_LEN: usize = 8;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
/// Returns an error if the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Password hashing behind a handle the service context can own
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordService;

impl PasswordService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Check strength, then hash
    ///
    /// # Errors
    /// Returns a domain error for weak passwords, internal error if hashing fails
    pub fn hash_new(&self, password: &str) -> Result<String, AppError> {
        validate_password_strength(password)?;
        hash_password(password)
    }

    /// # Errors
    /// Returns `AppError::InvalidCredentials` if the password doesn't match
    pub fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if verify_password(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

/// At least eight characters with an uppercase letter, a lowercase letter and a digit
///
/// # Errors
/// Returns `DomainError::WeakPassword` naming the first unmet rule
pub fn validate_password_strength(password: &str) -> Result<(), DomainError> {
    let weak = |msg: &str| Err(DomainError::WeakPassword(msg.to_string()));

    if password.chars().count() < MIN_PASSWORD_LEN {
        return weak("Password must be at least 8 characters long");
    }
    if !password.chars().any(char::is_uppercase) {
        return weak("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(char::is_lowercase) {
        return weak("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return weak("Password must contain at least one digit");
    }

    Ok(())
}
