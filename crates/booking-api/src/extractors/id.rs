//! Path parameter extractor for Snowflake IDs

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use booking_core::Snowflake;

use crate::response::ApiError;

/// The single `:id`-style segment of a route, parsed as a [`Snowflake`]
#[derive(Debug, Clone, Copy)]
pub struct SnowflakePath(pub Snowflake);

#[async_trait]
impl<S> FromRequestParts<S> for SnowflakePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        raw.parse()
            .map(SnowflakePath)
            .map_err(|_| ApiError::invalid_path(format!("Invalid id format: {raw}")))
    }
}
