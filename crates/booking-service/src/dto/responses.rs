//! Response DTOs for API endpoints
//!
//! Snowflake IDs are serialized as strings for JavaScript compatibility,
//! prices as two-decimal strings.

use booking_core::{EventStatus, Price, Role};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with cursor-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(
        data: Vec<T>,
        before: Option<String>,
        after: Option<String>,
        has_more: bool,
        limit: i64,
    ) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                before,
                after,
                has_more,
                limit,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Cursor for fetching the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Cursor for fetching the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    pub has_more: bool,
    pub limit: i64,
}

// ============================================================================
// Auth Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// Full account view, for the owner and for admins
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub profile_picture: String,
    pub created_at: DateTime<Utc>,
}

/// What any signed-in user may see about another account
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserResponse {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub profile_picture: String,
}

// ============================================================================
// Event Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub price: Price,
    pub seats: i32,
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_link: Option<String>,
    pub image: String,
    pub created_by: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Booking Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub user: UserResponse,
    /// Booked event ID
    pub event: String,
    /// Current state of the booked event
    pub event_details: EventResponse,
    pub booked_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
