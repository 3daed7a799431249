//! Error handling utilities for repositories

use booking_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    map_db_error(e)
}

/// Like [`map_unique_violation`], also mapping a dangling foreign key to
/// `on_missing`
pub fn map_insert_violation<U, M>(e: SqlxError, on_unique: U, on_missing: M) -> DomainError
where
    U: FnOnce(Option<&str>) -> DomainError,
    M: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_missing(db_err.constraint());
        }
    }
    map_unique_violation(e, on_unique)
}

/// Which account field a users-table unique violation refers to
pub fn user_conflict(constraint: Option<&str>) -> DomainError {
    match constraint {
        Some("users_username_key") => DomainError::UsernameAlreadyExists,
        _ => DomainError::EmailAlreadyExists,
    }
}
