//! Service layer error types

use booking_common::{error::domain_status, AppError};
use booking_core::DomainError;

/// Service layer error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Application error (auth, validation, etc.)
    #[error(transparent)]
    App(#[from] AppError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e.category()),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The underlying domain error, if this is one
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) | Self::App(AppError::Domain(e)) => Some(e),
            _ => None,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => AppError::NotFound(format!("{resource} {id}")),
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            ServiceError::Internal(msg) => AppError::internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use booking_core::Snowflake;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("User", "123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "User not found: 123");
    }

    #[test]
    fn test_ledger_errors_keep_their_codes() {
        let exhausted = ServiceError::from(DomainError::NoSeatsAvailable);
        assert_eq!(exhausted.status_code(), 409);
        assert_eq!(exhausted.error_code(), "NO_SEATS_AVAILABLE");

        let past = ServiceError::from(DomainError::EventInPast);
        assert_eq!(past.status_code(), 400);

        let missing = ServiceError::from(DomainError::BookingNotFound(Snowflake::new(4)));
        assert_eq!(missing.status_code(), 404);
    }

    #[test]
    fn test_as_domain_sees_through_app_errors() {
        let err = ServiceError::from(AppError::from(DomainError::AlreadyBooked));
        assert!(matches!(err.as_domain(), Some(DomainError::AlreadyBooked)));
        assert!(ServiceError::validation("x").as_domain().is_none());
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::conflict("taken").into();
        assert_eq!(app_err.status_code(), 409);

        let app_err: AppError = ServiceError::from(DomainError::AdminRequired).into();
        assert_eq!(app_err.status_code(), 403);
    }
}
