use std::collections::HashSet;

use kernel::interface::auth::RoleAssignment;
use kernel::prelude::entity::{UserEmail, UserRole};

use crate::env_opt;

static ADMIN_EMAILS: &str = "ADMIN_EMAILS";

/// Grants the admin role to a fixed set of addresses, everyone else is a user.
#[derive(Debug, Clone, Default)]
pub struct EnvRoleAssignment {
    admins: HashSet<String>,
}

impl EnvRoleAssignment {
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let admins = admins
            .into_iter()
            .map(|email| email.as_ref().trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();
        Self { admins }
    }

    /// Reads the comma separated `ADMIN_EMAILS`. Unset means no admins.
    pub fn from_env() -> Self {
        let admins = env_opt(ADMIN_EMAILS).unwrap_or_default();
        let assignment = Self::new(admins.split(','));
        tracing::debug!(admins = assignment.admins.len(), "Loaded admin addresses");
        assignment
    }
}

impl RoleAssignment for EnvRoleAssignment {
    fn role_for(&self, email: &UserEmail) -> UserRole {
        if self.admins.contains(email.as_ref().as_str()) {
            UserRole::Admin
        } else {
            UserRole::User
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::auth::RoleAssignment;
    use kernel::prelude::entity::{UserEmail, UserRole};

    use super::EnvRoleAssignment;

    #[test]
    fn listed_addresses_are_admins() {
        let roles = EnvRoleAssignment::new(" Root@Example.com ,, ops@example.com".split(','));
        let root = UserEmail::new("root@example.com").unwrap();
        let reader = UserEmail::new("reader@example.com").unwrap();
        assert_eq!(roles.role_for(&root), UserRole::Admin);
        assert_eq!(roles.role_for(&reader), UserRole::User);
        assert_eq!(EnvRoleAssignment::default().role_for(&root), UserRole::User);
    }
}
