mod email;
mod id;
mod name;
mod password;
mod principal;
mod role;
mod token;

pub use self::{email::*, id::*, name::*, password::*, principal::*, role::*, token::*};
use crate::entity::CreatedAt;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Destructure, References)]
pub struct User {
    id: UserId,
    name: UserName,
    email: UserEmail,
    password: HashedPassword,
    role: UserRole,
    created_at: CreatedAt<User>,
}

impl User {
    pub fn new(
        id: UserId,
        name: UserName,
        email: UserEmail,
        password: HashedPassword,
        role: UserRole,
        created_at: CreatedAt<User>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password,
            role,
            created_at,
        }
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.id.clone(), self.role)
    }
}
