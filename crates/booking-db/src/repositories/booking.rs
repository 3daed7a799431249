//! PostgreSQL implementation of BookingRepository (the seat ledger)
//!
//! Every seat change happens inside a transaction that first takes the
//! event row with `SELECT ... FOR UPDATE`. Locks are always taken in the
//! order user, event, booking: bookers hold their account with `FOR KEY
//! SHARE`, account deletion holds it with `FOR UPDATE`, so a booking never
//! slips in between releasing an account's seats and deleting it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use booking_core::{
    Booking, BookingRepository, BookingWithEvent, DomainError, Event, RepoResult, Snowflake,
};

use crate::models::{BookingWithEventModel, EventModel};

use super::error::{map_db_error, map_insert_violation};

/// PostgreSQL implementation of BookingRepository
#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Pin the account for the rest of the transaction. `exclusive` blocks
/// bookers; otherwise only deletion is blocked.
async fn lock_user(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Snowflake,
    exclusive: bool,
) -> RepoResult<()> {
    let sql = if exclusive {
        "SELECT id FROM users WHERE id = $1 FOR UPDATE"
    } else {
        "SELECT id FROM users WHERE id = $1 FOR KEY SHARE"
    };

    sqlx::query_scalar::<_, i64>(sql)
        .bind(user_id.into_inner())
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?
        .map(|_| ())
        .ok_or(DomainError::UserNotFound(user_id))
}

/// Take the event row exclusively for the rest of the transaction
async fn lock_event(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Snowflake,
) -> RepoResult<Option<Event>> {
    sqlx::query_as::<_, EventModel>(
        r"
        SELECT id, name, description, category, date, venue, price_cents, seats, status,
               location_link, image, created_by, published_at, updated_at
        FROM events
        WHERE id = $1
        FOR UPDATE
        ",
    )
    .bind(event_id.into_inner())
    .fetch_optional(&mut **tx)
    .await
    .map_err(map_db_error)?
    .map(Event::try_from)
    .transpose()
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    #[instrument(skip(self))]
    async fn find_for_user(
        &self,
        booking_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<BookingWithEvent>> {
        sqlx::query_as::<_, BookingWithEventModel>(
            r"
            SELECT b.id AS booking_id, b.user_id, b.booked_at,
                   e.id, e.name, e.description, e.category, e.date, e.venue, e.price_cents,
                   e.seats, e.status, e.location_link, e.image, e.created_by,
                   e.published_at, e.updated_at
            FROM bookings b
            JOIN events e ON e.id = b.event_id
            WHERE b.id = $1 AND b.user_id = $2
            ",
        )
        .bind(booking_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(BookingWithEvent::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<BookingWithEvent>> {
        sqlx::query_as::<_, BookingWithEventModel>(
            r"
            SELECT b.id AS booking_id, b.user_id, b.booked_at,
                   e.id, e.name, e.description, e.category, e.date, e.venue, e.price_cents,
                   e.seats, e.status, e.location_link, e.image, e.created_by,
                   e.published_at, e.updated_at
            FROM bookings b
            JOIN events e ON e.id = b.event_id
            WHERE b.user_id = $1
            ORDER BY b.booked_at DESC, b.id DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?
        .into_iter()
        .map(BookingWithEvent::try_from)
        .collect()
    }

    #[instrument(skip(self))]
    async fn exists(&self, user_id: Snowflake, event_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE user_id = $1 AND event_id = $2)",
        )
        .bind(user_id.into_inner())
        .bind(event_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, booking), fields(booking_id = %booking.id, event_id = %booking.event_id))]
    async fn create_reserving_seat(
        &self,
        booking: &Booking,
        now: DateTime<Utc>,
    ) -> RepoResult<BookingWithEvent> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        lock_user(&mut tx, booking.user_id, false).await?;
        let event = lock_event(&mut tx, booking.event_id)
            .await?
            .ok_or(DomainError::EventNotFound(booking.event_id))?;
        event.ensure_bookable(now)?;

        sqlx::query(
            r"
            INSERT INTO bookings (id, user_id, event_id, booked_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(booking.id.into_inner())
        .bind(booking.user_id.into_inner())
        .bind(booking.event_id.into_inner())
        .bind(booking.booked_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_insert_violation(
                e,
                |_| DomainError::AlreadyBooked,
                |constraint| match constraint {
                    Some("bookings_event_id_fkey") => DomainError::EventNotFound(booking.event_id),
                    _ => DomainError::UserNotFound(booking.user_id),
                },
            )
        })?;

        let updated = sqlx::query_as::<_, EventModel>(
            r"
            UPDATE events
            SET seats = seats - 1
            WHERE id = $1 AND seats > 0
            RETURNING id, name, description, category, date, venue, price_cents, seats, status,
                      location_link, image, created_by, published_at, updated_at
            ",
        )
        .bind(booking.event_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::NoSeatsAvailable)?;

        tx.commit().await.map_err(map_db_error)?;

        let event = Event::try_from(updated)?;
        debug!(seats_left = event.seats, "Seat reserved");

        Ok(BookingWithEvent {
            booking: booking.clone(),
            event,
        })
    }

    #[instrument(skip(self))]
    async fn cancel_releasing_seat(
        &self,
        booking_id: Snowflake,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let event_id = sqlx::query_scalar::<_, i64>(
            "SELECT event_id FROM bookings WHERE id = $1 AND user_id = $2",
        )
        .bind(booking_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(Snowflake::new)
        .ok_or(DomainError::BookingNotFound(booking_id))?;

        // A missing event means the booking was cascaded away in the meantime
        let event = lock_event(&mut tx, event_id)
            .await?
            .ok_or(DomainError::BookingNotFound(booking_id))?;
        event.ensure_cancellable(now)?;

        let deleted = sqlx::query("DELETE FROM bookings WHERE id = $1 AND user_id = $2")
            .bind(booking_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        // Lost a race with another cancel of the same booking
        if deleted.rows_affected() == 0 {
            return Err(DomainError::BookingNotFound(booking_id));
        }

        sqlx::query("UPDATE events SET seats = seats + 1 WHERE id = $1")
            .bind(event_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(event_id = %event_id, "Seat released");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_user_releasing_seats(&self, user_id: Snowflake) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        lock_user(&mut tx, user_id, true).await?;

        // Then events (by id), then bookings, as single bookings do
        sqlx::query(
            r"
            SELECT id FROM events
            WHERE id IN (SELECT event_id FROM bookings WHERE user_id = $1)
            ORDER BY id
            FOR UPDATE
            ",
        )
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let released = sqlx::query_scalar::<_, i64>(
            r"
            WITH removed AS (
                DELETE FROM bookings WHERE user_id = $1 RETURNING event_id
            ),
            per_event AS (
                SELECT event_id, COUNT(*)::INT AS n FROM removed GROUP BY event_id
            ),
            restored AS (
                UPDATE events e
                SET seats = e.seats + p.n
                FROM per_event p
                WHERE e.id = p.event_id
                RETURNING p.n
            )
            SELECT COALESCE(SUM(n), 0)::BIGINT FROM restored
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Cascades to events the account created and their bookings
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(released, "Account deleted");
        Ok(u64::try_from(released).unwrap_or_default())
    }
}
