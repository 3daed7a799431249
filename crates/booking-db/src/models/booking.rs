//! Booking database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::EventModel;

/// Database model for bookings table
#[derive(Debug, Clone, FromRow)]
pub struct BookingModel {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub booked_at: DateTime<Utc>,
}

/// A booking row joined with its event (`bookings b JOIN events e`)
#[derive(Debug, Clone, FromRow)]
pub struct BookingWithEventModel {
    #[sqlx(rename = "booking_id")]
    pub id: i64,
    pub user_id: i64,
    pub booked_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub event: EventModel,
}
