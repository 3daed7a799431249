//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use booking_core::{EventStatus, Price, Role, Snowflake};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Changes a user may make to their own account
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: Option<String>,

    /// Stored image path; an empty string resets to the default picture
    pub profile_picture: Option<String>,
}

/// Changes made through `/users/:id`. Only admins may change `role`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: UpdateProfileRequest,

    pub role: Option<Role>,
}

// ============================================================================
// Event Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: String,

    pub date: DateTime<Utc>,

    #[validate(length(min = 1, max = 255, message = "Venue must be 1-255 characters"))]
    pub venue: String,

    pub price: Price,

    /// Initial inventory; fixed here, afterwards only bookings move it
    #[validate(range(min = 0, message = "Seats cannot be negative"))]
    pub seats: i32,

    pub status: Option<EventStatus>,

    #[validate(url(message = "Location link must be a valid URL"))]
    pub location_link: Option<String>,

    pub image: Option<String>,
}

/// Partial catalog update. Has no `seats` field; inventory only moves through bookings.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,

    pub date: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 255, message = "Venue must be 1-255 characters"))]
    pub venue: Option<String>,

    pub price: Option<Price>,

    pub status: Option<EventStatus>,

    #[validate(url(message = "Location link must be a valid URL"))]
    pub location_link: Option<String>,

    /// Stored image path; an empty string resets to the default image
    pub image: Option<String>,
}

// ============================================================================
// Booking Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// Event to book
    pub event: Snowflake,
}
