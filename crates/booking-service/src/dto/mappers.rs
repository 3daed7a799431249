//! Entity to DTO mappers

use booking_core::{BookingWithEvent, Event, User};

use super::responses::{BookingResponse, EventResponse, PublicUserResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            profile_picture: user.profile_picture.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            profile_picture: user.profile_picture.clone(),
        }
    }
}

// ============================================================================
// Event Mappers
// ============================================================================

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            name: event.name.clone(),
            description: event.description.clone(),
            category: event.category.clone(),
            date: event.date,
            venue: event.venue.clone(),
            price: event.price,
            seats: event.seats,
            status: event.status,
            location_link: event.location_link.clone(),
            image: event.image.clone(),
            created_by: event.created_by.to_string(),
            published_at: event.published_at,
            updated_at: event.updated_at,
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self::from(&event)
    }
}

// ============================================================================
// Booking Mappers
// ============================================================================

impl BookingResponse {
    /// `owner` is the account the booking belongs to
    pub fn new(entry: &BookingWithEvent, owner: &User) -> Self {
        Self {
            id: entry.booking.id.to_string(),
            user: UserResponse::from(owner),
            event: entry.booking.event_id.to_string(),
            event_details: EventResponse::from(&entry.event),
            booked_at: entry.booking.booked_at,
        }
    }
}
