use destructure::Destructure;
use vodca::References;

use crate::entity::{UserId, UserRole};

/// The authenticated caller.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Principal {
    id: UserId,
    role: UserRole,
}

impl Principal {
    pub fn new(id: UserId, role: UserRole) -> Self {
        Self { id, role }
    }

    pub fn has_role(&self, required: &[UserRole]) -> bool {
        required.contains(&self.role)
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use super::Principal;
    use crate::entity::{UserId, UserRole};

    #[test]
    fn has_role_checks_membership() {
        let admin = Principal::new(UserId::new(Uuid::new_v4()), UserRole::Admin);
        let reader = Principal::new(UserId::new(Uuid::new_v4()), UserRole::User);
        assert!(admin.has_role(&[UserRole::Admin]));
        assert!(!reader.has_role(&[UserRole::Admin]));
        assert!(reader.has_role(&[UserRole::User, UserRole::Admin]));
        assert!(!reader.has_role(&[]));
    }
}
