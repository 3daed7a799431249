//! In-memory repositories and a ready-made service context for service tests
//!
//! All state sits behind one mutex, and every repository call holds it for
//! its whole body, so each ledger operation is atomic the same way the
//! Postgres transactions are.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use booking_common::JwtService;
use booking_core::{
    Booking, BookingRepository, BookingWithEvent, DomainError, Event, EventQuery,
    EventRepository, FixedClock, ImageStore, Price, RepoResult, Role, Snowflake, User,
    UserRepository,
};
use booking_service::{ServiceContext, ServiceError};
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;

#[derive(Default)]
struct State {
    users: BTreeMap<Snowflake, (User, String)>,
    events: BTreeMap<Snowflake, Event>,
    bookings: BTreeMap<Snowflake, Booking>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn seats(&self, event_id: Snowflake) -> i32 {
        self.state
            .lock()
            .events
            .get(&event_id)
            .map_or(-1, |e| e.seats)
    }

    pub fn booking_count(&self) -> usize {
        self.state.lock().bookings.len()
    }

    pub fn event(&self, event_id: Snowflake) -> Option<Event> {
        self.state.lock().events.get(&event_id).cloned()
    }

    /// Move an event's date, bypassing the services
    pub fn set_event_date(&self, event_id: Snowflake, date: DateTime<Utc>) {
        if let Some(event) = self.state.lock().events.get_mut(&event_id) {
            event.date = date;
        }
    }

    fn joined(state: &State, booking: &Booking) -> RepoResult<BookingWithEvent> {
        let event = state
            .events
            .get(&booking.event_id)
            .cloned()
            .ok_or(DomainError::EventNotFound(booking.event_id))?;
        Ok(BookingWithEvent {
            booking: booking.clone(),
            event,
        })
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .values()
            .find(|(u, _)| u.username == username)
            .map(|(u, _)| u.clone()))
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .users
            .values()
            .any(|(u, _)| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.state.lock().users.values().any(|(u, _)| u.email == email))
    }

    async fn list(&self) -> RepoResult<Vec<User>> {
        Ok(self
            .state
            .lock()
            .users
            .values()
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.users.values().any(|(u, _)| u.username == user.username) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if state.users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state
            .users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut state = self.state.lock();
        let (stored, _) = state
            .users
            .get_mut(&user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        *stored = user.clone();
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.state.lock().users.get(&id).map(|(_, h)| h.clone()))
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>> {
        Ok(self.state.lock().events.get(&id).cloned())
    }

    async fn list(&self, query: EventQuery) -> RepoResult<Vec<Event>> {
        let state = self.state.lock();
        let limit = usize::try_from(query.limit.clamp(1, 100)).unwrap_or(100);

        let events = match (query.before, query.after) {
            (Some(before), _) => {
                let mut page: Vec<Event> = state
                    .events
                    .range(..before)
                    .rev()
                    .take(limit)
                    .map(|(_, e)| e.clone())
                    .collect();
                page.reverse();
                page
            }
            (None, Some(after)) => state
                .events
                .range(after..)
                .filter(|(id, _)| **id != after)
                .take(limit)
                .map(|(_, e)| e.clone())
                .collect(),
            (None, None) => state.events.values().take(limit).cloned().collect(),
        };
        Ok(events)
    }

    async fn create(&self, event: &Event) -> RepoResult<()> {
        self.state.lock().events.insert(event.id, event.clone());
        Ok(())
    }

    async fn update(&self, event: &Event) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .events
            .get_mut(&event.id)
            .ok_or(DomainError::EventNotFound(event.id))?;
        let seats = stored.seats;
        *stored = event.clone();
        stored.seats = seats;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        state
            .events
            .remove(&id)
            .ok_or(DomainError::EventNotFound(id))?;
        state.bookings.retain(|_, b| b.event_id != id);
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn find_for_user(
        &self,
        booking_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<BookingWithEvent>> {
        let state = self.state.lock();
        state
            .bookings
            .get(&booking_id)
            .filter(|b| b.user_id == user_id)
            .map(|b| Self::joined(&state, b))
            .transpose()
    }

    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<BookingWithEvent>> {
        let state = self.state.lock();
        let mut owned: Vec<&Booking> = state
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .collect();
        owned.sort_by(|a, b| (b.booked_at, b.id).cmp(&(a.booked_at, a.id)));
        owned.into_iter().map(|b| Self::joined(&state, b)).collect()
    }

    async fn exists(&self, user_id: Snowflake, event_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .bookings
            .values()
            .any(|b| b.user_id == user_id && b.event_id == event_id))
    }

    async fn create_reserving_seat(
        &self,
        booking: &Booking,
        now: DateTime<Utc>,
    ) -> RepoResult<BookingWithEvent> {
        let mut state = self.state.lock();

        if !state.users.contains_key(&booking.user_id) {
            return Err(DomainError::UserNotFound(booking.user_id));
        }
        let event = state
            .events
            .get(&booking.event_id)
            .ok_or(DomainError::EventNotFound(booking.event_id))?;
        event.ensure_bookable(now)?;

        let duplicate = state
            .bookings
            .values()
            .any(|b| b.user_id == booking.user_id && b.event_id == booking.event_id);
        if duplicate {
            return Err(DomainError::AlreadyBooked);
        }

        let event = state
            .events
            .get_mut(&booking.event_id)
            .ok_or(DomainError::EventNotFound(booking.event_id))?;
        event.reserve_seat()?;
        let event = event.clone();

        state.bookings.insert(booking.id, booking.clone());
        Ok(BookingWithEvent {
            booking: booking.clone(),
            event,
        })
    }

    async fn cancel_releasing_seat(
        &self,
        booking_id: Snowflake,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut state = self.state.lock();

        let event_id = state
            .bookings
            .get(&booking_id)
            .filter(|b| b.user_id == user_id)
            .map(|b| b.event_id)
            .ok_or(DomainError::BookingNotFound(booking_id))?;

        let event = state
            .events
            .get_mut(&event_id)
            .ok_or(DomainError::BookingNotFound(booking_id))?;
        event.ensure_cancellable(now)?;
        event.release_seat();

        state.bookings.remove(&booking_id);
        Ok(())
    }

    async fn delete_user_releasing_seats(&self, user_id: Snowflake) -> RepoResult<u64> {
        let mut state = self.state.lock();

        state
            .users
            .remove(&user_id)
            .ok_or(DomainError::UserNotFound(user_id))?;

        let held: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        for booking in &held {
            state.bookings.remove(&booking.id);
            if let Some(event) = state.events.get_mut(&booking.event_id) {
                event.release_seat();
            }
        }

        // Events the account created go with it, seats not restored
        let owned: Vec<Snowflake> = state
            .events
            .values()
            .filter(|e| e.created_by == user_id)
            .map(|e| e.id)
            .collect();
        for event_id in &owned {
            state.events.remove(event_id);
        }
        state.bookings.retain(|_, b| !owned.contains(&b.event_id));

        Ok(held.len() as u64)
    }
}

/// Image store that only records what it was asked to delete
#[derive(Clone, Default)]
pub struct MemoryImageStore {
    removed: Arc<Mutex<Vec<String>>>,
}

impl MemoryImageStore {
    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().clone()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn remove(&self, path: &str) -> RepoResult<bool> {
        self.removed.lock().push(path.to_string());
        Ok(true)
    }
}

/// A context wired to memory stores and a clock pinned at [`Harness::now`]
pub struct Harness {
    pub ctx: Arc<ServiceContext>,
    pub store: MemoryStore,
    pub images: MemoryImageStore,
    pub now: DateTime<Utc>,
}

impl Harness {
    pub fn new() -> Self {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let store = MemoryStore::default();
        let images = MemoryImageStore::default();

        let ctx = ServiceContext::builder()
            .user_repo(Arc::new(store.clone()))
            .event_repo(Arc::new(store.clone()))
            .booking_repo(Arc::new(store.clone()))
            .image_store(Arc::new(images.clone()))
            .clock(Arc::new(FixedClock::new(now)))
            .jwt_service(Arc::new(JwtService::new(
                "test-secret-key-at-least-32-bytes-long",
                900,
                604_800,
            )))
            .build()
            .unwrap();

        Self {
            ctx: Arc::new(ctx),
            store,
            images,
            now,
        }
    }

    pub async fn user(&self, username: &str) -> User {
        let user = User::new(
            self.ctx.generate_id(),
            username.to_string(),
            format!("{username}@example.com"),
            self.now,
        );
        UserRepository::create(&self.store, &user, "unused-hash")
            .await
            .unwrap();
        user
    }

    pub async fn admin(&self, username: &str) -> User {
        let mut user = self.user(username).await;
        user.role = Role::Admin;
        UserRepository::update(&self.store, &user).await.unwrap();
        user
    }

    /// An upcoming event a week from now, created by `owner`
    pub async fn event(&self, owner: &User, seats: i32) -> Event {
        self.event_at(owner, seats, self.now + Duration::days(7)).await
    }

    pub async fn event_at(&self, owner: &User, seats: i32, date: DateTime<Utc>) -> Event {
        let event = Event::new(
            self.ctx.generate_id(),
            "Concert".to_string(),
            String::new(),
            "music".to_string(),
            date,
            "Main Hall".to_string(),
            Price::from_cents(2_500).unwrap(),
            seats,
            owner.id,
            self.now,
        )
        .unwrap();
        EventRepository::create(&self.store, &event).await.unwrap();
        event
    }
}

/// The domain error behind a service error, panicking if there is none
pub fn domain(err: &ServiceError) -> &DomainError {
    err.as_domain()
        .unwrap_or_else(|| panic!("expected a domain error, got {err:?}"))
}
