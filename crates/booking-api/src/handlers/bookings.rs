//! Booking handlers
//!
//! Every route is scoped to the caller; another user's booking is reported
//! as not found.

use axum::{extract::State, Json};
use booking_service::dto::{BookingResponse, CreateBookingRequest};
use booking_service::BookingService;

use crate::extractors::{AuthUser, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<BookingResponse>>> {
    let service = BookingService::new(state.service_context());
    let response = service.list_bookings(&auth.identity()).await?;
    Ok(Json(response))
}

/// Book one seat
///
/// POST /bookings `{"event": "<event_id>"}`
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> ApiResult<Created<Json<BookingResponse>>> {
    let service = BookingService::new(state.service_context());
    let response = service.create_booking(&auth.identity(), request).await?;
    Ok(Created(Json(response)))
}

/// GET /bookings/{booking_id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(booking_id): SnowflakePath,
) -> ApiResult<Json<BookingResponse>> {
    let service = BookingService::new(state.service_context());
    let response = service.get_booking(&auth.identity(), booking_id).await?;
    Ok(Json(response))
}

/// Cancel a booking and return its seat
///
/// DELETE /bookings/{booking_id}
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(booking_id): SnowflakePath,
) -> ApiResult<NoContent> {
    let service = BookingService::new(state.service_context());
    service.cancel_booking(&auth.identity(), booking_id).await?;
    Ok(NoContent)
}
