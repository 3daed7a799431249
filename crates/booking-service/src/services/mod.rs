//! Business logic services
//!
//! Services borrow a [`ServiceContext`] per call and orchestrate domain
//! rules over the repository ports.

pub mod auth;
pub mod booking;
pub mod context;
pub mod error;
pub mod event;
pub mod image;
pub mod user;

pub use auth::AuthService;
pub use booking::BookingService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use image::{ImageService, LocalImageStore};
pub use user::UserService;
