//! Booking entity - one seat held by one user for one event

use chrono::{DateTime, Utc};

use crate::entities::Event;
use crate::value_objects::Snowflake;

/// A reservation. At most one exists per (user, event) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub event_id: Snowflake,
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        event_id: Snowflake,
        booked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            event_id,
            booked_at,
        }
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}

/// A booking joined with the current state of its event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWithEvent {
    pub booking: Booking,
    pub event: Event,
}
