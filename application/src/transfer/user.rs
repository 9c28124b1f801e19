use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructUser, User};

#[derive(Debug, Clone)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: OffsetDateTime,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            email,
            role,
            created_at,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: role.to_string(),
            created_at: *created_at.as_ref(),
        }
    }
}

/// Account together with a freshly issued access token.
#[derive(Debug, Clone)]
pub struct SessionDto {
    pub user: UserDto,
    pub token: String,
}

pub struct RegisterUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct LoginDto {
    pub email: String,
    pub password: String,
}
