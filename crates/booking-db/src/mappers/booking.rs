//! Booking entity <-> model mapper

use booking_core::{Booking, BookingWithEvent, DomainError, Event, Snowflake};

use crate::models::{BookingModel, BookingWithEventModel};

impl From<BookingModel> for Booking {
    fn from(model: BookingModel) -> Self {
        Booking::new(
            Snowflake::new(model.id),
            Snowflake::new(model.user_id),
            Snowflake::new(model.event_id),
            model.booked_at,
        )
    }
}

impl TryFrom<BookingWithEventModel> for BookingWithEvent {
    type Error = DomainError;

    fn try_from(model: BookingWithEventModel) -> Result<Self, Self::Error> {
        let event = Event::try_from(model.event)?;
        let booking = Booking::new(
            Snowflake::new(model.id),
            Snowflake::new(model.user_id),
            event.id,
            model.booked_at,
        );

        Ok(BookingWithEvent { booking, event })
    }
}
