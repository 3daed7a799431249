//! User entity <-> model mapper

use booking_core::{DomainError, Role, Snowflake, User};

use crate::models::UserModel;

use super::corrupt_row;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role: Role = model.role.parse().map_err(|e| corrupt_row("role", e))?;

        Ok(User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            role,
            is_superuser: model.is_superuser,
            profile_picture: model.profile_picture,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Column values for `INSERT INTO users`
pub struct UserInsert<'a> {
    pub id: i64,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role: &'static str,
    pub is_superuser: bool,
    pub profile_picture: &'a str,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User, password_hash: &'a str) -> Self {
        Self {
            id: user.id.into_inner(),
            username: &user.username,
            email: &user.email,
            password_hash,
            first_name: &user.first_name,
            last_name: &user.last_name,
            role: user.role.as_str(),
            is_superuser: user.is_superuser,
            profile_picture: &user.profile_picture,
        }
    }
}

/// Column values for `UPDATE users`
pub struct UserUpdate<'a> {
    pub id: i64,
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role: &'static str,
    pub profile_picture: &'a str,
}

impl<'a> UserUpdate<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: &user.username,
            email: &user.email,
            first_name: &user.first_name,
            last_name: &user.last_name,
            role: user.role.as_str(),
            profile_picture: &user.profile_picture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(role: &str) -> UserModel {
        UserModel {
            id: 7,
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: role.to_string(),
            is_superuser: false,
            profile_picture: "profile_pictures/default.png".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_entity() {
        let user = User::try_from(model("admin")).unwrap();
        assert_eq!(user.id, Snowflake::new(7));
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = User::try_from(model("superadmin")).unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }

    #[test]
    fn test_insert_uses_role_text() {
        let user = User::try_from(model("user")).unwrap();
        let insert = UserInsert::new(&user, "hash");
        assert_eq!(insert.role, "user");
        assert_eq!(insert.password_hash, "hash");
    }
}
