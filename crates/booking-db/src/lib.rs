//! # booking-db
//!
//! PostgreSQL implementations of the repository traits from `booking-core`.
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity <-> model mappers
//! - Repository implementations, including the transactional seat ledger
//!
//! ## Usage
//!
//! ```rust,ignore
//! use booking_common::AppConfig;
//! use booking_db::{create_pool, run_migrations, PgBookingRepository};
//!
//! async fn example(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool, &config.database.migrations_dir).await?;
//!     let bookings = PgBookingRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{PgBookingRepository, PgEventRepository, PgUserRepository};
