//! Authentication extractors
//!
//! Turn a `Bearer` access token into the caller's [`Identity`].

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use booking_core::{require_admin, Identity, Role, Snowflake};

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller, taken from a verified access token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Snowflake,
    pub role: Role,
}

impl AuthUser {
    pub fn identity(&self) -> Identity {
        Identity::new(self.user_id, self.role)
    }
}

impl From<Identity> for AuthUser {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            role: identity.role,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                ApiError::InvalidToken
            })?;

        let identity = claims.identity().map_err(|e| {
            tracing::warn!(error = %e, "Malformed token claims");
            ApiError::InvalidToken
        })?;

        Ok(Self::from(identity))
    }
}

/// Authenticated caller whose token claims the admin role.
///
/// Only a first filter: the services confirm the role against the stored
/// account before acting.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

impl AdminUser {
    pub fn identity(&self) -> Identity {
        self.0.identity()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_admin(&user.identity())?;
        Ok(Self(user))
    }
}
