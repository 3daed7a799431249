//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance and `DATABASE_URL`.
//! They are skipped when it is not set.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{Duration, Utc};
use futures::future::join_all;
use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer, API,
};
use reqwest::StatusCode;
use serde_json::json;

async fn server() -> Option<TestServer> {
    if !check_test_env() {
        return None;
    }
    Some(TestServer::start().await.expect("Failed to start server"))
}

async fn create_event(server: &TestServer, admin: &AuthResponse, seats: i32) -> EventResponse {
    let response = server
        .post_auth(
            &format!("{API}/events"),
            &admin.access_token,
            &CreateEventRequest::upcoming(seats),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn seats_of(server: &TestServer, event_id: &str) -> i32 {
    let response = server.get(&format!("{API}/events/{event_id}")).await.unwrap();
    let event: EventResponse = assert_json(response, StatusCode::OK).await.unwrap();
    event.seats
}

async fn book(server: &TestServer, user: &AuthResponse, event_id: &str) -> reqwest::Response {
    server
        .post_auth(
            &format!("{API}/bookings"),
            &user.access_token,
            &CreateBookingRequest {
                event: event_id.to_string(),
            },
        )
        .await
        .unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let Some(server) = server().await else { return };

    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_login_refresh() {
    let Some(server) = server().await else { return };
    let request = RegisterRequest::unique();

    let response = server
        .post(&format!("{API}/auth/register"), &request)
        .await
        .unwrap();
    let registered: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(registered.user.username, request.username);
    assert_eq!(registered.user.role, "user");
    assert_eq!(registered.user.profile_picture, "profile_pictures/default.png");
    assert_eq!(registered.token_type, "Bearer");

    let response = server
        .post(
            &format!("{API}/auth/login"),
            &LoginRequest::from_register(&request),
        )
        .await
        .unwrap();
    let logged_in: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(logged_in.user.id, registered.user.id);

    let response = server
        .post(
            &format!("{API}/auth/refresh"),
            &RefreshTokenRequest {
                refresh_token: logged_in.refresh_token,
            },
        )
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("{API}/users/@me"), &refreshed.access_token)
        .await
        .unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, registered.user.id);
}

#[tokio::test]
async fn test_register_conflicts_and_weak_password() {
    let Some(server) = server().await else { return };
    let request = RegisterRequest::unique();

    server
        .post(&format!("{API}/auth/register"), &request)
        .await
        .unwrap();
    let response = server
        .post(&format!("{API}/auth/register"), &request)
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT, "USERNAME_ALREADY_EXISTS")
        .await
        .unwrap();

    let mut weak = RegisterRequest::unique();
    weak.password = "alllowercase1".to_string();
    let response = server
        .post(&format!("{API}/auth/register"), &weak)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "WEAK_PASSWORD")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let Some(server) = server().await else { return };
    let request = RegisterRequest::unique();
    server
        .post(&format!("{API}/auth/register"), &request)
        .await
        .unwrap();

    let response = server
        .post(
            &format!("{API}/auth/login"),
            &LoginRequest {
                username: request.username,
                password: "WrongPass123".to_string(),
            },
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        .await
        .unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_update_own_profile() {
    let Some(server) = server().await else { return };
    let user = server.register().await.unwrap();

    let response = server
        .patch_auth(
            &format!("{API}/users/@me"),
            &user.access_token,
            &json!({ "first_name": "Grace" }),
        )
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.first_name, "Grace");
    assert_eq!(updated.email, user.user.email);
}

#[tokio::test]
async fn test_user_admin_guards() {
    let Some(server) = server().await else { return };
    let alice = server.register().await.unwrap();
    let bob = server.register().await.unwrap();
    let admin = server.admin().await.unwrap();

    let response = server
        .get_auth(&format!("{API}/users"), &alice.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(
            &format!("{API}/users/{}", bob.user.id),
            &alice.access_token,
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_ACCOUNT_OWNER")
        .await
        .unwrap();

    let response = server
        .delete_auth(
            &format!("{API}/users/{}", admin.user.id),
            &admin.access_token,
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "ADMIN_CANNOT_DELETE_SELF")
        .await
        .unwrap();

    let response = server
        .get_auth(&format!("{API}/users"), &admin.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Event Tests
// ============================================================================

#[tokio::test]
async fn test_event_catalog() {
    let Some(server) = server().await else { return };
    let admin = server.admin().await.unwrap();
    let user = server.register().await.unwrap();

    let response = server
        .post_auth(
            &format!("{API}/events"),
            &user.access_token,
            &CreateEventRequest::upcoming(10),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "ADMIN_REQUIRED")
        .await
        .unwrap();

    let event = create_event(&server, &admin, 10).await;
    assert_eq!(event.seats, 10);
    assert_eq!(event.status, "upcoming");
    assert_eq!(event.price, "25.00");
    assert_eq!(event.image, "event_images/default.png");
    assert_eq!(event.created_by, admin.user.id);

    // Public read, no token
    assert_eq!(seats_of(&server, &event.id).await, 10);

    // Seats in an update body are ignored
    let response = server
        .patch_auth(
            &format!("{API}/events/{}", event.id),
            &admin.access_token,
            &json!({ "name": "Renamed", "seats": 99 }),
        )
        .await
        .unwrap();
    let updated: EventResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.seats, 10);

    let response = server
        .get(&format!("{API}/events?limit=1&before={}", event.id))
        .await
        .unwrap();
    let page: Page<EventResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.limit, 1);
    assert!(page.data.iter().all(|e| e.id != event.id));

    let response = server
        .delete_auth(&format!("{API}/events/{}", event.id), &admin.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("{API}/events/{}", event.id)).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_EVENT")
        .await
        .unwrap();
}

// ============================================================================
// Booking Tests
// ============================================================================

#[tokio::test]
async fn test_booking_lifecycle() {
    let Some(server) = server().await else { return };
    let admin = server.admin().await.unwrap();
    let alice = server.register().await.unwrap();
    let bob = server.register().await.unwrap();
    let event = create_event(&server, &admin, 3).await;

    let booking: BookingResponse = assert_json(book(&server, &alice, &event.id).await, StatusCode::CREATED)
        .await
        .unwrap();
    assert_eq!(booking.event, event.id);
    assert_eq!(booking.user.id, alice.user.id);
    assert_eq!(booking.event_details.seats, 2);
    assert_eq!(seats_of(&server, &event.id).await, 2);

    assert_error(
        book(&server, &alice, &event.id).await,
        StatusCode::CONFLICT,
        "ALREADY_BOOKED",
    )
    .await
    .unwrap();
    assert_eq!(seats_of(&server, &event.id).await, 2);

    let response = server
        .get_auth(&format!("{API}/bookings"), &alice.access_token)
        .await
        .unwrap();
    let listed: Vec<BookingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 1);

    let path = format!("{API}/bookings/{}", booking.id);
    let response = server.get_auth(&path, &bob.access_token).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_BOOKING")
        .await
        .unwrap();
    let response = server.delete_auth(&path, &bob.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete_auth(&path, &alice.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    assert_eq!(seats_of(&server, &event.id).await, 3);

    let response = server.delete_auth(&path, &alice.access_token).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_BOOKING")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_sold_out_and_past_events() {
    let Some(server) = server().await else { return };
    let admin = server.admin().await.unwrap();
    let alice = server.register().await.unwrap();
    let bob = server.register().await.unwrap();

    let event = create_event(&server, &admin, 1).await;
    assert_status(book(&server, &alice, &event.id).await, StatusCode::CREATED)
        .await
        .unwrap();
    assert_error(
        book(&server, &bob, &event.id).await,
        StatusCode::CONFLICT,
        "NO_SEATS_AVAILABLE",
    )
    .await
    .unwrap();
    assert_eq!(seats_of(&server, &event.id).await, 0);

    let response = server
        .post_auth(
            &format!("{API}/events"),
            &admin.access_token,
            &CreateEventRequest::on(Utc::now() - Duration::days(1), 5),
        )
        .await
        .unwrap();
    let past: EventResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_error(
        book(&server, &alice, &past.id).await,
        StatusCode::BAD_REQUEST,
        "EVENT_IN_PAST",
    )
    .await
    .unwrap();
    assert_eq!(seats_of(&server, &past.id).await, 5);
}

#[tokio::test]
async fn test_deleting_a_user_releases_seats() {
    let Some(server) = server().await else { return };
    let admin = server.admin().await.unwrap();
    let alice = server.register().await.unwrap();
    let event = create_event(&server, &admin, 2).await;

    assert_status(book(&server, &alice, &event.id).await, StatusCode::CREATED)
        .await
        .unwrap();
    assert_eq!(seats_of(&server, &event.id).await, 1);

    let response = server
        .delete_auth(
            &format!("{API}/users/{}", alice.user.id),
            &admin.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    assert_eq!(seats_of(&server, &event.id).await, 2);

    // Alice's access token has not expired yet
    assert_error(
        book(&server, &alice, &event.id).await,
        StatusCode::NOT_FOUND,
        "UNKNOWN_USER",
    )
    .await
    .unwrap();
    assert_eq!(seats_of(&server, &event.id).await, 2);
}

#[tokio::test]
async fn test_concurrent_bookings_never_oversell() {
    let Some(server) = server().await else { return };
    let admin = server.admin().await.unwrap();
    let event = create_event(&server, &admin, 2).await;

    let mut users = Vec::new();
    for _ in 0..6 {
        users.push(server.register().await.unwrap());
    }

    let responses = join_all(users.iter().map(|user| book(&server, user, &event.id))).await;
    let created = responses
        .iter()
        .filter(|r| r.status() == StatusCode::CREATED)
        .count();
    let sold_out = responses
        .iter()
        .filter(|r| r.status() == StatusCode::CONFLICT)
        .count();

    assert_eq!(created, 2);
    assert_eq!(sold_out, 4);
    assert_eq!(seats_of(&server, &event.id).await, 0);
}
