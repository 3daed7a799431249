//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use booking_core::{DomainError, RepoResult, Snowflake, User, UserRepository};

use crate::mappers::{UserInsert, UserUpdate};
use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_conflict};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, first_name, last_name, role, is_superuser,
                   profile_picture, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(User::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, first_name, last_name, role, is_superuser,
                   profile_picture, created_at, updated_at
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(User::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<User>> {
        sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, first_name, last_name, role, is_superuser,
                   profile_picture, created_at, updated_at
            FROM users
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?
        .into_iter()
        .map(User::try_from)
        .collect()
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let row = UserInsert::new(user, password_hash);

        sqlx::query(
            r"
            INSERT INTO users (id, username, email, password_hash, first_name, last_name,
                               role, is_superuser, profile_picture, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(row.id)
        .bind(row.username)
        .bind(row.email)
        .bind(row.password_hash)
        .bind(row.first_name)
        .bind(row.last_name)
        .bind(row.role)
        .bind(row.is_superuser)
        .bind(row.profile_picture)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, user_conflict))?;

        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let row = UserUpdate::new(user);

        let result = sqlx::query(
            r"
            UPDATE users
            SET username = $2, email = $3, first_name = $4, last_name = $5,
                role = $6, profile_picture = $7, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(row.id)
        .bind(row.username)
        .bind(row.email)
        .bind(row.first_name)
        .bind(row.last_name)
        .bind(row.role)
        .bind(row.profile_picture)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, user_conflict))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
