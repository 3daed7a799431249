//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in booking-core.

mod booking;
mod error;
mod event;
mod user;

pub use booking::PgBookingRepository;
pub use event::PgEventRepository;
pub use user::PgUserRepository;
