//! # booking-core
//!
//! Domain layer containing entities, value objects, the seat ledger rules,
//! role guards, and the ports (repository, clock, image store) implemented by
//! the infrastructure crates.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod access;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use access::{ensure_can_modify_user, require_admin, Identity, UserAction};
pub use entities::{Booking, BookingWithEvent, Event, EventStatus, Role, User};
pub use error::{DomainError, ErrorCategory};
pub use traits::{
    BookingRepository, Clock, EventQuery, EventRepository, FixedClock, ImageKind, ImageStore,
    RepoResult, SystemClock, UserRepository,
};
pub use value_objects::{Price, PriceParseError, Snowflake, SnowflakeGenerator, SnowflakeParseError};
