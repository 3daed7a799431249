//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, path IDs and pagination.

mod auth;
mod id;
mod pagination;
mod validated;

pub use auth::{AdminUser, AuthUser};
pub use id::SnowflakePath;
pub use pagination::{Pagination, PaginationParams, DEFAULT_LIMIT, MAX_LIMIT};
pub use validated::ValidatedJson;
