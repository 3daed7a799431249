//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers from domain entities to response DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateBookingRequest, CreateEventRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    UpdateEventRequest, UpdateProfileRequest, UpdateUserRequest,
};

pub use responses::{
    AuthResponse, BookingResponse, EventResponse, HealthChecks, HealthResponse, PaginatedResponse,
    PaginationMeta, PublicUserResponse, ReadinessResponse, UserResponse,
};
