//! Ports implemented by the infrastructure crates

mod clock;
mod repositories;
mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use repositories::{
    BookingRepository, EventQuery, EventRepository, RepoResult, UserRepository,
};
pub use storage::{ImageKind, ImageStore};
