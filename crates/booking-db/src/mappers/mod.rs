//! Entity <-> model mappers
//!
//! - `TryFrom<Model> for Entity`: rows carry enums as text, so decoding can fail
//! - `*Insert`/`*Update` structs: entity fields as bindable column values

mod booking;
mod event;
mod user;

pub use event::{EventInsert, EventUpdate};
pub use user::{UserInsert, UserUpdate};

use booking_core::DomainError;

/// A stored value that the domain refuses to decode
fn corrupt_row(what: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::DatabaseError(format!("invalid {what} in row: {detail}"))
}
