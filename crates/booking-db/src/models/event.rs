//! Event database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for events table
#[derive(Debug, Clone, FromRow)]
pub struct EventModel {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub price_cents: i64,
    pub seats: i32,
    pub status: String,
    pub location_link: Option<String>,
    pub image: String,
    pub created_by: i64,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
