//! Route handlers
//!
//! Handlers stay thin: extract, call one service method, wrap the result.

pub mod auth;
pub mod bookings;
pub mod events;
pub mod health;
pub mod users;
