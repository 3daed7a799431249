//! Route definitions
//!
//! API routes are mounted under `/api/v1`; health probes sit at the root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, bookings, events, health, users};
use crate::state::AppState;

/// All `/api/v1` routes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept apart so they bypass rate limiting
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(event_routes())
        .merge(booking_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route(
            "/users/@me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route(
            "/users/:user_id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:event_id",
            get(events::get_event)
                .patch(events::update_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
}

fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route(
            "/bookings/:booking_id",
            get(bookings::get_booking).delete(bookings::cancel_booking),
        )
}
