//! Database models - SQLx-compatible structs for PostgreSQL tables

mod booking;
mod event;
mod user;

pub use booking::{BookingModel, BookingWithEventModel};
pub use event::EventModel;
pub use user::UserModel;
