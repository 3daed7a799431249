//! Event catalog handlers
//!
//! Reads are public; writes need an admin token.

use axum::{extract::State, Json};
use booking_service::dto::{
    CreateEventRequest, EventResponse, PaginatedResponse, UpdateEventRequest,
};
use booking_service::EventService;

use crate::extractors::{AdminUser, Pagination, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /events?before=&after=&limit=
pub async fn list_events(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.list_events(pagination.into()).await?;
    Ok(Json(response))
}

/// GET /events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    SnowflakePath(event_id): SnowflakePath,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.get_event(event_id).await?;
    Ok(Json(response))
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> ApiResult<Created<Json<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.create_event(&admin.identity(), request).await?;
    Ok(Created(Json(response)))
}

/// Partial update. `seats` is not accepted here.
///
/// PATCH|PUT /events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    admin: AdminUser,
    SnowflakePath(event_id): SnowflakePath,
    ValidatedJson(request): ValidatedJson<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service
        .update_event(&admin.identity(), event_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /events/{event_id}
pub async fn delete_event(
    State(state): State<AppState>,
    admin: AdminUser,
    SnowflakePath(event_id): SnowflakePath,
) -> ApiResult<NoContent> {
    let service = EventService::new(state.service_context());
    service.delete_event(&admin.identity(), event_id).await?;
    Ok(NoContent)
}
