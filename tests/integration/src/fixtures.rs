//! Request and response shapes used by the HTTP tests

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Suffix that stays unique across test runs sharing one database
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user_{suffix}"),
            email: format!("user_{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            username: reg.username.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub role: String,
    pub profile_picture: String,
}

#[derive(Debug, Serialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub price: String,
    pub seats: i32,
}

impl CreateEventRequest {
    /// An event a week from now
    pub fn upcoming(seats: i32) -> Self {
        Self::on(Utc::now() + Duration::days(7), seats)
    }

    pub fn on(date: DateTime<Utc>, seats: i32) -> Self {
        Self {
            name: format!("Event {}", unique_suffix()),
            category: "music".to_string(),
            date,
            venue: "Main Hall".to_string(),
            price: "25.00".to_string(),
            seats,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EventResponse {
    pub id: String,
    pub name: String,
    pub price: String,
    pub seats: i32,
    pub status: String,
    pub image: String,
    pub created_by: String,
}

#[derive(Debug, Serialize)]
pub struct CreateBookingRequest {
    pub event: String,
}

#[derive(Debug, Deserialize)]
pub struct BookingResponse {
    pub id: String,
    pub user: UserResponse,
    pub event: String,
    pub event_details: EventResponse,
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub before: Option<String>,
    pub after: Option<String>,
    pub has_more: bool,
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
