//! Pagination extractor
//!
//! Cursor parameters for the event catalog: `?before=&after=&limit=`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use booking_core::{EventQuery, Snowflake};
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size
pub const DEFAULT_LIMIT: i64 = 50;
/// Maximum page size
pub const MAX_LIMIT: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Validated pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    /// Clamped to `1..=MAX_LIMIT`
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            before: None,
            after: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<Pagination> for EventQuery {
    fn from(page: Pagination) -> Self {
        Self {
            before: page.before,
            after: page.after,
            limit: page.limit,
        }
    }
}

fn cursor(raw: Option<String>, name: &str) -> Result<Option<Snowflake>, ApiError> {
    raw.filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Snowflake>()
                .map_err(|_| ApiError::invalid_query(format!("Invalid '{name}' cursor format")))
        })
        .transpose()
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        Ok(Self {
            before: cursor(params.before, "before")?,
            after: cursor(params.after, "after")?,
            limit: params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Self::try_from(params)
    }
}
