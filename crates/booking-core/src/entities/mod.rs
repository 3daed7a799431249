//! Domain entities - core business objects

mod booking;
mod event;
mod user;

pub use booking::{Booking, BookingWithEvent};
pub use event::{Event, EventStatus};
pub use user::{Role, User};
