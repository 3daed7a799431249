//! Event entity <-> model mapper

use booking_core::{DomainError, Event, EventStatus, Price, Snowflake};

use crate::models::EventModel;

use super::corrupt_row;

impl TryFrom<EventModel> for Event {
    type Error = DomainError;

    fn try_from(model: EventModel) -> Result<Self, Self::Error> {
        let status: EventStatus = model.status.parse().map_err(|e| corrupt_row("status", e))?;
        let price = Price::from_cents(model.price_cents).map_err(|e| corrupt_row("price", e))?;

        Ok(Event {
            id: Snowflake::new(model.id),
            name: model.name,
            description: model.description,
            category: model.category,
            date: model.date,
            venue: model.venue,
            price,
            seats: model.seats,
            status,
            location_link: model.location_link,
            image: model.image,
            created_by: Snowflake::new(model.created_by),
            published_at: model.published_at,
            updated_at: model.updated_at,
        })
    }
}

/// Column values for `INSERT INTO events`
pub struct EventInsert<'a> {
    pub id: i64,
    pub name: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub venue: &'a str,
    pub price_cents: i64,
    pub seats: i32,
    pub status: &'static str,
    pub location_link: Option<&'a str>,
    pub image: &'a str,
    pub created_by: i64,
}

impl<'a> EventInsert<'a> {
    pub fn new(event: &'a Event) -> Self {
        Self {
            id: event.id.into_inner(),
            name: &event.name,
            description: &event.description,
            category: &event.category,
            venue: &event.venue,
            price_cents: event.price.cents(),
            seats: event.seats,
            status: event.status.as_str(),
            location_link: event.location_link.as_deref(),
            image: &event.image,
            created_by: event.created_by.into_inner(),
        }
    }
}

/// Column values for `UPDATE events`. Carries no seat count.
pub struct EventUpdate<'a> {
    pub id: i64,
    pub name: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub venue: &'a str,
    pub price_cents: i64,
    pub status: &'static str,
    pub location_link: Option<&'a str>,
    pub image: &'a str,
}

impl<'a> EventUpdate<'a> {
    pub fn new(event: &'a Event) -> Self {
        Self {
            id: event.id.into_inner(),
            name: &event.name,
            description: &event.description,
            category: &event.category,
            venue: &event.venue,
            price_cents: event.price.cents(),
            status: event.status.as_str(),
            location_link: event.location_link.as_deref(),
            image: &event.image,
        }
    }
}
