//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Coarse classification of a domain error.
///
/// Every outer layer maps a category to its own status representation,
/// so adding a variant only requires placing it in a category here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Validation,
    Authorization,
    Conflict,
    /// The target exists but is in a state that forbids the operation
    InvalidState,
    /// A finite resource has run out
    Exhausted,
    Internal,
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Event not found: {0}")]
    EventNotFound(Snowflake),

    #[error("Booking not found: {0}")]
    BookingNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Administrator role required")]
    AdminRequired,

    #[error("You're not allowed to modify another admin")]
    CannotModifyAdmin,

    #[error("Admins cannot delete themselves")]
    AdminCannotDeleteSelf,

    #[error("You can only modify your own account")]
    NotAccountOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("You have already booked this event")]
    AlreadyBooked,

    // =========================================================================
    // Ledger State Violations
    // =========================================================================
    #[error("Cannot book a non-upcoming event")]
    EventNotUpcoming,

    #[error("Cannot book a past event")]
    EventInPast,

    #[error("Cannot cancel booking for a past event")]
    CancelPastEvent,

    #[error("No seats available for this event")]
    NoSeatsAvailable,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",
            Self::BookingNotFound(_) => "UNKNOWN_BOOKING",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidPrice(_) => "INVALID_PRICE",
            Self::WeakPassword(_) => "WEAK_PASSWORD",

            // Authorization
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::CannotModifyAdmin => "CANNOT_MODIFY_ADMIN",
            Self::AdminCannotDeleteSelf => "ADMIN_CANNOT_DELETE_SELF",
            Self::NotAccountOwner => "NOT_ACCOUNT_OWNER",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyBooked => "ALREADY_BOOKED",

            // Ledger
            Self::EventNotUpcoming => "EVENT_NOT_UPCOMING",
            Self::EventInPast => "EVENT_IN_PAST",
            Self::CancelPastEvent => "CANCEL_PAST_EVENT",
            Self::NoSeatsAvailable => "NO_SEATS_AVAILABLE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UserNotFound(_) | Self::EventNotFound(_) | Self::BookingNotFound(_) => {
                ErrorCategory::NotFound
            }
            Self::ValidationError(_) | Self::InvalidPrice(_) | Self::WeakPassword(_) => {
                ErrorCategory::Validation
            }
            Self::AdminRequired
            | Self::CannotModifyAdmin
            | Self::AdminCannotDeleteSelf
            | Self::NotAccountOwner => ErrorCategory::Authorization,
            Self::UsernameAlreadyExists | Self::EmailAlreadyExists | Self::AlreadyBooked => {
                ErrorCategory::Conflict
            }
            Self::EventNotUpcoming | Self::EventInPast | Self::CancelPastEvent => {
                ErrorCategory::InvalidState
            }
            Self::NoSeatsAvailable => ErrorCategory::Exhausted,
            Self::DatabaseError(_) | Self::StorageError(_) | Self::InternalError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        self.category() == ErrorCategory::Authorization
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        self.category() == ErrorCategory::Conflict
    }

    /// Check if the target is in a state that forbids the operation
    pub fn is_invalid_state(&self) -> bool {
        self.category() == ErrorCategory::InvalidState
    }

    /// Check if a finite resource (seats) has run out
    pub fn is_exhausted(&self) -> bool {
        self.category() == ErrorCategory::Exhausted
    }
}
