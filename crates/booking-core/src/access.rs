//! Caller identity and role guards
//!
//! Guards are plain functions over [`Identity`] / [`User`]; handlers and
//! services call them before touching protected resources. The booking
//! ledger itself never consults roles.

use crate::entities::{Role, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Authenticated caller, as established from a verified access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Snowflake,
    pub role: Role,
}

impl Identity {
    pub const fn new(user_id: Snowflake, role: Role) -> Self {
        Self { user_id, role }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Kind of change an actor wants to make to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Update,
    Delete,
}

/// Require the admin role
pub fn require_admin(identity: &Identity) -> Result<(), DomainError> {
    match identity.role {
        Role::Admin => Ok(()),
        Role::User => Err(DomainError::AdminRequired),
    }
}

/// Decide whether `actor` may apply `action` to `target`.
///
/// - superusers may do anything
/// - admin accounts can only be modified by themselves, and never deleted by themselves
/// - regular accounts can be modified by themselves or by any admin
pub fn ensure_can_modify_user(
    actor: &User,
    target: &User,
    action: UserAction,
) -> Result<(), DomainError> {
    if actor.is_superuser {
        return Ok(());
    }

    let is_self = actor.id == target.id;

    match target.role {
        Role::Admin if !is_self => Err(DomainError::CannotModifyAdmin),
        Role::Admin if action == UserAction::Delete => Err(DomainError::AdminCannotDeleteSelf),
        Role::Admin => Ok(()),
        Role::User if is_self || actor.is_admin() => Ok(()),
        Role::User => Err(DomainError::NotAccountOwner),
    }
}
