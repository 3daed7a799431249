//! Authentication service
//!
//! Handles registration, login and token refresh. Tokens are stateless
//! JWTs; a refresh re-reads the account so role changes and deletions
//! take effect on the next refresh.

use booking_common::{AppError, TokenSubject};
use booking_core::{DomainError, User};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user with the `user` role
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let password_hash = self.ctx.password_service().hash_new(&request.password)?;

        if self.ctx.user_repo().username_exists(&request.username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let mut user = User::new(
            self.ctx.generate_id(),
            request.username,
            request.email,
            self.ctx.now(),
        );
        user.first_name = request.first_name.unwrap_or_default();
        user.last_name = request.last_name.unwrap_or_default();

        // The unique constraints still decide if a concurrent registration won
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");
        self.issue(&user, None)
    }

    /// Login with username and password
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown username");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if let Err(e) = self
            .ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User logged in");
        self.issue(&user, None)
    }

    /// Exchange a refresh token for a new pair within the same session
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Refresh for a deleted account");
                AppError::InvalidToken
            })?;

        info!(user_id = %user.id, "Tokens refreshed");
        self.issue(&user, claims.session_id)
    }

    fn issue(&self, user: &User, session_id: Option<String>) -> ServiceResult<AuthResponse> {
        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(&TokenSubject::from(user), Some(session_id))?;

        Ok(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            user: UserResponse::from(user),
        })
    }
}
