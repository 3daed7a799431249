//! Event entity - a dated happening with a finite seat inventory
//!
//! `seats` is the remaining inventory. Only the booking ledger changes it,
//! never catalog updates. [`Event::reserve_seat`] / [`Event::release_seat`]
//! state the per-seat rule for in-process stores; the PostgreSQL ledger
//! applies the same rule in SQL (`seats > 0` guard on the decrement, backed
//! by `CHECK (seats >= 0)`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::traits::ImageKind;
use crate::value_objects::{Price, Snowflake};

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown event status: {other}")),
        }
    }
}

/// Event entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: Snowflake,
    pub name: String,
    pub description: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub price: Price,
    /// Remaining seats, never negative
    pub seats: i32,
    pub status: EventStatus,
    pub location_link: Option<String>,
    pub image: String,
    pub created_by: Snowflake,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create an upcoming event with the default image
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        name: String,
        description: String,
        category: String,
        date: DateTime<Utc>,
        venue: String,
        price: Price,
        seats: i32,
        created_by: Snowflake,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if seats < 0 {
            return Err(DomainError::ValidationError(
                "Seats cannot be negative".to_string(),
            ));
        }

        Ok(Self {
            id,
            name,
            description,
            category,
            date,
            venue,
            price,
            seats,
            status: EventStatus::Upcoming,
            location_link: None,
            image: ImageKind::EventImage.default_path().to_string(),
            created_by,
            published_at: now,
            updated_at: now,
        })
    }

    /// Whether the event starts at or before `now`
    #[inline]
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.date <= now
    }

    #[inline]
    pub fn has_seats(&self) -> bool {
        self.seats > 0
    }

    /// Check the booking preconditions that depend on the event alone.
    ///
    /// Order matters: status, then date, then inventory. The first failing
    /// rule is reported.
    pub fn ensure_bookable(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status != EventStatus::Upcoming {
            return Err(DomainError::EventNotUpcoming);
        }
        if self.has_started(now) {
            return Err(DomainError::EventInPast);
        }
        if !self.has_seats() {
            return Err(DomainError::NoSeatsAvailable);
        }
        Ok(())
    }

    /// Bookings can be cancelled (and their seat returned) only before the event
    pub fn ensure_cancellable(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.has_started(now) {
            return Err(DomainError::CancelPastEvent);
        }
        Ok(())
    }

    /// Take one seat from the inventory. Fails without touching `seats` when
    /// none are left.
    pub fn reserve_seat(&mut self) -> Result<(), DomainError> {
        if !self.has_seats() {
            return Err(DomainError::NoSeatsAvailable);
        }
        self.seats -= 1;
        Ok(())
    }

    /// Return one seat to the inventory
    pub fn release_seat(&mut self) {
        self.seats += 1;
    }
}
