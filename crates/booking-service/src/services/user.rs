//! User service
//!
//! Profile reads and edits, admin listing, and guarded modification of
//! other accounts.

use booking_common::AppError;
use booking_core::{
    ensure_can_modify_user, require_admin, DomainError, Identity, ImageKind, Role, Snowflake,
    User, UserAction,
};
use tracing::{info, instrument, warn};

use crate::dto::{PublicUserResponse, UpdateProfileRequest, UpdateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::image::ImageService;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Check an admin identity against the stored account, so a demotion
    /// applies before the caller's token expires. Returns the current identity.
    #[instrument(skip(self))]
    pub async fn confirm_admin(&self, identity: &Identity) -> ServiceResult<Identity> {
        require_admin(identity)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(identity.user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %identity.user_id, "Admin token for a deleted account");
                AppError::InvalidToken
            })?;

        let current = user.identity();
        require_admin(&current)?;
        Ok(current)
    }

    /// The caller's own account
    #[instrument(skip(self))]
    pub async fn get_profile(&self, identity: &Identity) -> ServiceResult<UserResponse> {
        let user = self.load(identity.user_id).await?;
        Ok(UserResponse::from(&user))
    }

    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        identity: &Identity,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let user = self.load(identity.user_id).await?;
        let user = self.apply_update(user, request, None).await?;
        Ok(UserResponse::from(&user))
    }

    /// All accounts (admin only)
    #[instrument(skip(self))]
    pub async fn list_users(&self, identity: &Identity) -> ServiceResult<Vec<UserResponse>> {
        self.confirm_admin(identity).await?;

        let users = self.ctx.user_repo().list().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Public view of any account
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<PublicUserResponse> {
        let user = self.load(user_id).await?;
        Ok(PublicUserResponse::from(&user))
    }

    /// Modify another account (or one's own) subject to the role guard
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        identity: &Identity,
        target_id: Snowflake,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let actor = self.load(identity.user_id).await?;
        let target = self.load(target_id).await?;

        ensure_can_modify_user(&actor, &target, UserAction::Update)?;

        let role = match request.role {
            Some(role) if role != target.role => {
                if !actor.is_superuser {
                    require_admin(&actor.identity())?;
                }
                Some(role)
            }
            _ => None,
        };

        let user = self.apply_update(target, request.profile, role).await?;
        Ok(UserResponse::from(&user))
    }

    /// Delete an account, returning the seats its bookings held
    #[instrument(skip(self))]
    pub async fn delete_user(&self, identity: &Identity, target_id: Snowflake) -> ServiceResult<()> {
        let actor = self.load(identity.user_id).await?;
        let target = self.load(target_id).await?;

        ensure_can_modify_user(&actor, &target, UserAction::Delete)?;

        let released = self
            .ctx
            .booking_repo()
            .delete_user_releasing_seats(target.id)
            .await?;

        ImageService::new(self.ctx)
            .delete_image(ImageKind::ProfilePicture, &target.profile_picture)
            .await;

        info!(user_id = %target.id, deleted_by = %actor.id, released, "User deleted");
        Ok(())
    }

    async fn apply_update(
        &self,
        mut user: User,
        request: UpdateProfileRequest,
        role: Option<Role>,
    ) -> ServiceResult<User> {
        if let Some(username) = request.username {
            if username != user.username {
                if self.ctx.user_repo().username_exists(&username).await? {
                    return Err(DomainError::UsernameAlreadyExists.into());
                }
                user.username = username;
            }
        }
        if let Some(email) = request.email {
            if email != user.email {
                if self.ctx.user_repo().email_exists(&email).await? {
                    return Err(DomainError::EmailAlreadyExists.into());
                }
                user.email = email;
            }
        }
        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(role) = role {
            user.role = role;
        }

        let old_picture = user.profile_picture.clone();
        if request.profile_picture.is_some() {
            user.profile_picture = ImageService::target_path(
                ImageKind::ProfilePicture,
                request.profile_picture.as_deref(),
            );
        }

        user.updated_at = self.ctx.now();
        self.ctx.user_repo().update(&user).await?;

        if user.profile_picture != old_picture {
            ImageService::new(self.ctx)
                .replace_image(
                    ImageKind::ProfilePicture,
                    &old_picture,
                    Some(&user.profile_picture),
                )
                .await;
        }

        info!(user_id = %user.id, "User updated");
        Ok(user)
    }
}
