//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use booking_core::{DomainError, Event, EventQuery, EventRepository, RepoResult, Snowflake};

use crate::mappers::{EventInsert, EventUpdate};
use crate::models::EventModel;

use super::error::map_db_error;

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>> {
        sqlx::query_as::<_, EventModel>(
            r"
            SELECT id, name, description, category, date, venue, price_cents, seats, status,
                   location_link, image, created_by, published_at, updated_at
            FROM events
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(Event::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: EventQuery) -> RepoResult<Vec<Event>> {
        let limit = query.limit.clamp(1, 100);

        let mut rows = match (query.before, query.after) {
            (Some(before), None) => {
                // Page ending just before the cursor; fetched backwards, reversed below
                sqlx::query_as::<_, EventModel>(
                    r"
                    SELECT id, name, description, category, date, venue, price_cents, seats, status,
                           location_link, image, created_by, published_at, updated_at
                    FROM events
                    WHERE id < $1
                    ORDER BY id DESC
                    LIMIT $2
                    ",
                )
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(after)) => {
                sqlx::query_as::<_, EventModel>(
                    r"
                    SELECT id, name, description, category, date, venue, price_cents, seats, status,
                           location_link, image, created_by, published_at, updated_at
                    FROM events
                    WHERE id > $1
                    ORDER BY id ASC
                    LIMIT $2
                    ",
                )
                .bind(after.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query_as::<_, EventModel>(
                    r"
                    SELECT id, name, description, category, date, venue, price_cents, seats, status,
                           location_link, image, created_by, published_at, updated_at
                    FROM events
                    ORDER BY id ASC
                    LIMIT $1
                    ",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        if query.before.is_some() && query.after.is_none() {
            rows.reverse();
        }

        rows.into_iter().map(Event::try_from).collect()
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, event: &Event) -> RepoResult<()> {
        let row = EventInsert::new(event);

        sqlx::query(
            r"
            INSERT INTO events (id, name, description, category, date, venue, price_cents, seats,
                                status, location_link, image, created_by, published_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(row.id)
        .bind(row.name)
        .bind(row.description)
        .bind(row.category)
        .bind(event.date)
        .bind(row.venue)
        .bind(row.price_cents)
        .bind(row.seats)
        .bind(row.status)
        .bind(row.location_link)
        .bind(row.image)
        .bind(row.created_by)
        .bind(event.published_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: &Event) -> RepoResult<()> {
        let row = EventUpdate::new(event);

        let result = sqlx::query(
            r"
            UPDATE events
            SET name = $2, description = $3, category = $4, date = $5, venue = $6,
                price_cents = $7, status = $8, location_link = $9, image = $10,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(row.id)
        .bind(row.name)
        .bind(row.description)
        .bind(row.category)
        .bind(event.date)
        .bind(row.venue)
        .bind(row.price_cents)
        .bind(row.status)
        .bind(row.location_link)
        .bind(row.image)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(event.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // Bookings go with the event (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgEventRepository>();
    }
}
