//! Integration test utilities for the event booking API
//!
//! Spawns the real server against PostgreSQL and talks to it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
