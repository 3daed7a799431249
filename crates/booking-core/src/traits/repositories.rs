//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Booking, BookingWithEvent, Event, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by login name
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// List all users ordered by ID
    async fn list(&self) -> RepoResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields (username, email, names, role, picture)
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Event Repository
// ============================================================================

/// Cursor pagination options for the event catalog
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find event by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>>;

    /// List events ordered by ID ascending
    async fn list(&self, query: EventQuery) -> RepoResult<Vec<Event>>;

    /// Create a new event, including its initial seat count
    async fn create(&self, event: &Event) -> RepoResult<()>;

    /// Update catalog fields. Never writes `seats`.
    async fn update(&self, event: &Event) -> RepoResult<()>;

    /// Delete an event. Its bookings are removed with it and no seats are restored.
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Booking Repository (the seat ledger)
// ============================================================================

/// Persistence for bookings.
///
/// The three mutating operations are the only code paths that change an
/// event's seat count after creation, and the last one is the only way an
/// account is removed. Each runs as one atomic unit: either the
/// booking row and the seat counter both change, or neither does.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find a booking owned by `user_id`, joined with its event
    async fn find_for_user(
        &self,
        booking_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<BookingWithEvent>>;

    /// All bookings owned by `user_id`, newest first
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<BookingWithEvent>>;

    /// Whether `user_id` already holds a booking for `event_id`
    async fn exists(&self, user_id: Snowflake, event_id: Snowflake) -> RepoResult<bool>;

    /// Insert `booking` and take one seat from its event.
    ///
    /// Re-validates [`Event::ensure_bookable`] against `now` while holding the
    /// event exclusively, and reports a concurrent duplicate as
    /// [`DomainError::AlreadyBooked`]. Fails with [`DomainError::UserNotFound`]
    /// if the booking's owner no longer exists. Returns the booking with the
    /// post-decrement event.
    async fn create_reserving_seat(
        &self,
        booking: &Booking,
        now: DateTime<Utc>,
    ) -> RepoResult<BookingWithEvent>;

    /// Delete a booking owned by `user_id` and return its seat.
    ///
    /// Fails with [`DomainError::BookingNotFound`] if the booking does not exist
    /// or belongs to someone else, and with [`DomainError::CancelPastEvent`]
    /// once the event has started.
    async fn cancel_releasing_seat(
        &self,
        booking_id: Snowflake,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Delete the account `user_id` together with its bookings, returning one
    /// seat per booking, in one atomic unit.
    ///
    /// Holds the account exclusively for the whole unit so a concurrent
    /// booking either lands before and is released, or fails with
    /// [`DomainError::UserNotFound`]. Events created by the account are
    /// removed with it, without restoring their bookings' seats. Returns the
    /// number of bookings released.
    async fn delete_user_releasing_seats(&self, user_id: Snowflake) -> RepoResult<u64>;
}
