use crate::entity::{AccessToken, HashedPassword, Principal, RawPassword, UserEmail, UserRole};
use crate::KernelError;

/// Issues and resolves bearer credentials.
pub trait PrincipalResolver: 'static + Sync + Send {
    fn issue(&self, principal: &Principal) -> error_stack::Result<AccessToken, KernelError>;

    /// Fails with [`KernelError::Unauthenticated`] for any credential that was
    /// not issued by [`PrincipalResolver::issue`] or has expired.
    fn resolve(&self, credential: &str) -> error_stack::Result<Principal, KernelError>;
}

pub trait DependOnPrincipalResolver: 'static + Sync + Send {
    type PrincipalResolver: PrincipalResolver;
    fn principal_resolver(&self) -> &Self::PrincipalResolver;
}

pub trait PasswordHashing: 'static + Sync + Send {
    fn hash(&self, password: &RawPassword) -> error_stack::Result<HashedPassword, KernelError>;
    fn verify(
        &self,
        password: &RawPassword,
        hashed: &HashedPassword,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnPasswordHashing: 'static + Sync + Send {
    type PasswordHashing: PasswordHashing;
    fn password_hashing(&self) -> &Self::PasswordHashing;
}

/// Decides the role granted to a newly registered account.
pub trait RoleAssignment: 'static + Sync + Send {
    fn role_for(&self, email: &UserEmail) -> UserRole;
}

pub trait DependOnRoleAssignment: 'static + Sync + Send {
    type RoleAssignment: RoleAssignment;
    fn role_assignment(&self) -> &Self::RoleAssignment;
}
