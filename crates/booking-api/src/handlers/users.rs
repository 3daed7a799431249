//! User handlers
//!
//! The caller's own profile under `/users/@me`, plus guarded access to
//! other accounts.

use axum::{extract::State, Json};
use booking_service::dto::{
    PublicUserResponse, UpdateProfileRequest, UpdateUserRequest, UserResponse,
};
use booking_service::UserService;

use crate::extractors::{AdminUser, AuthUser, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_profile(&auth.identity()).await?;
    Ok(Json(response))
}

/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(&auth.identity(), request).await?;
    Ok(Json(response))
}

/// List every account
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    admin: AdminUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.list_users(&admin.identity()).await?;
    Ok(Json(response))
}

/// Public profile of any account
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(user_id): SnowflakePath,
) -> ApiResult<Json<PublicUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}

/// PATCH /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(user_id): SnowflakePath,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service
        .update_user(&auth.identity(), user_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete an account and release its bookings
///
/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(user_id): SnowflakePath,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.delete_user(&auth.identity(), user_id).await?;
    Ok(NoContent)
}
