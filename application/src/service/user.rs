use error_stack::Report;
use uuid::Uuid;

use kernel::interface::auth::{
    DependOnPasswordHashing, DependOnPrincipalResolver, DependOnRoleAssignment, PasswordHashing,
    PrincipalResolver, RoleAssignment,
};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{
    CreatedAt, Principal, RawPassword, User, UserEmail, UserId, UserName,
};
use kernel::KernelError;

use crate::transfer::{LoginDto, RegisterUserDto, SessionDto, UserDto};

fn invalid_credentials() -> Report<KernelError> {
    Report::new(KernelError::Unauthenticated).attach_printable("invalid email or password")
}

#[async_trait::async_trait]
pub trait AuthenticateService: 'static + Sync + Send + DependOnPrincipalResolver {
    /// Resolves a bearer credential into the calling principal.
    async fn authenticate(&self, credential: &str) -> error_stack::Result<Principal, KernelError> {
        self.principal_resolver().resolve(credential)
    }
}

impl<T> AuthenticateService for T where T: DependOnPrincipalResolver {}

#[async_trait::async_trait]
pub trait RegisterUserService:
    'static
    + Sync
    + Send
    + DependOnUserQuery
    + DependOnUserModifier
    + DependOnPasswordHashing
    + DependOnPrincipalResolver
    + DependOnRoleAssignment
{
    async fn register_user(
        &self,
        dto: RegisterUserDto,
    ) -> error_stack::Result<SessionDto, KernelError> {
        let name = UserName::new(dto.name)?;
        let email = UserEmail::new(dto.email)?;
        let password = RawPassword::new(dto.password)?;
        let hashed = self.password_hashing().hash(&password)?;
        let role = self.role_assignment().role_for(&email);

        let mut connection = self.database_connection().transact().await?;

        if self
            .user_query()
            .find_by_email(&mut connection, &email)
            .await?
            .is_some()
        {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("email is already registered"));
        }

        let user = User::new(
            UserId::new(Uuid::new_v4()),
            name,
            email,
            hashed,
            role,
            CreatedAt::now(),
        );
        self.user_modifier().create(&mut connection, &user).await?;
        connection.commit().await?;

        let token = self.principal_resolver().issue(&user.principal())?;
        tracing::info!(user_id = %user.id().as_ref(), role = %role, "Registered user");
        Ok(SessionDto {
            user: UserDto::from(user),
            token: token.into(),
        })
    }
}

impl<T> RegisterUserService for T where
    T: DependOnUserQuery
        + DependOnUserModifier
        + DependOnPasswordHashing
        + DependOnPrincipalResolver
        + DependOnRoleAssignment
{
}

#[async_trait::async_trait]
pub trait LoginService:
    'static + Sync + Send + DependOnUserQuery + DependOnPasswordHashing + DependOnPrincipalResolver
{
    /// Unknown email and wrong password fail identically.
    async fn login(&self, dto: LoginDto) -> error_stack::Result<SessionDto, KernelError> {
        let email = UserEmail::new(dto.email).map_err(|_| invalid_credentials())?;
        let password = RawPassword::new(dto.password).map_err(|_| invalid_credentials())?;

        let mut connection = self.database_connection().transact().await?;

        let user = self
            .user_query()
            .find_by_email(&mut connection, &email)
            .await?
            .ok_or_else(invalid_credentials)?;
        if !self.password_hashing().verify(&password, user.password())? {
            tracing::debug!(user_id = %user.id().as_ref(), "Rejected login with wrong password");
            return Err(invalid_credentials());
        }

        let token = self.principal_resolver().issue(&user.principal())?;
        Ok(SessionDto {
            user: UserDto::from(user),
            token: token.into(),
        })
    }
}

impl<T> LoginService for T where
    T: DependOnUserQuery + DependOnPasswordHashing + DependOnPrincipalResolver
{
}

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery {
    async fn get_user(&self, principal: &Principal) -> error_stack::Result<UserDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user = self
            .user_query()
            .find_by_id(&mut connection, principal.id())
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound).attach_printable("user not found"))?;

        Ok(UserDto::from(user))
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery {}

#[cfg(test)]
mod test {
    use kernel::prelude::entity::UserRole;
    use kernel::KernelError;

    use crate::mock::{MockModule, ADMIN_EMAIL};
    use crate::service::{AuthenticateService, GetUserService, LoginService, RegisterUserService};
    use crate::transfer::{LoginDto, RegisterUserDto};

    fn register(name: &str, email: &str) -> RegisterUserDto {
        RegisterUserDto {
            name: name.to_string(),
            email: email.to_string(),
            password: "correct horse".to_string(),
        }
    }

    fn login(email: &str, password: &str) -> LoginDto {
        LoginDto {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn registered_token_resolves_to_account() {
        let module = MockModule::default();
        let session = module
            .register_user(register("Alice", "Alice@Example.com"))
            .await
            .unwrap();
        assert_eq!(session.user.email, "alice@example.com");
        assert_eq!(session.user.role, "user");

        let principal = module.authenticate(&session.token).await.unwrap();
        assert_eq!(*principal.id().as_ref(), session.user.id);
        assert_eq!(principal.role(), &UserRole::User);

        let me = module.get_user(&principal).await.unwrap();
        assert_eq!(me.name, "Alice");

        let stored = module.database().snapshot().await;
        assert_ne!(stored.users[0].password().as_ref(), "correct horse");
    }

    #[tokio::test]
    async fn configured_email_becomes_admin() {
        let module = MockModule::default();
        let session = module
            .register_user(register("Root", ADMIN_EMAIL))
            .await
            .unwrap();
        assert_eq!(session.user.role, "admin");
        let principal = module.authenticate(&session.token).await.unwrap();
        assert!(principal.has_role(&[UserRole::Admin]));
    }

    #[tokio::test]
    async fn email_is_unique_ignoring_case() {
        let module = MockModule::default();
        module
            .register_user(register("Alice", "alice@example.com"))
            .await
            .unwrap();
        let error = module
            .register_user(register("Other", "ALICE@example.com"))
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Conflict);
        assert_eq!(module.database().snapshot().await.users.len(), 1);
    }

    #[tokio::test]
    async fn register_validates_fields() {
        let module = MockModule::default();
        let mut dto = register("Alice", "alice@example.com");
        dto.password = "short".to_string();
        let error = module.register_user(dto).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Validation);

        let error = module
            .register_user(register("", "alice@example.com"))
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Validation);

        let error = module
            .register_user(register("Alice", "not-an-email"))
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Validation);
    }

    #[tokio::test]
    async fn login_checks_credentials() {
        let module = MockModule::default();
        let registered = module
            .register_user(register("Alice", "alice@example.com"))
            .await
            .unwrap();

        let session = module
            .login(login("ALICE@example.com", "correct horse"))
            .await
            .unwrap();
        assert_eq!(session.user.id, registered.user.id);
        assert!(module.authenticate(&session.token).await.is_ok());

        for (email, password) in [
            ("alice@example.com", "wrong horse"),
            ("nobody@example.com", "correct horse"),
            ("not-an-email", "correct horse"),
            ("alice@example.com", ""),
        ] {
            let error = module.login(login(email, password)).await.unwrap_err();
            assert_eq!(error.current_context(), &KernelError::Unauthenticated);
        }
    }

    #[tokio::test]
    async fn rejects_unknown_credentials() {
        let module = MockModule::default();
        for credential in ["", "garbage", "not-a-uuid:user"] {
            let error = module.authenticate(credential).await.unwrap_err();
            assert_eq!(error.current_context(), &KernelError::Unauthenticated);
        }
    }

    #[tokio::test]
    async fn missing_account_is_not_found() {
        let module = MockModule::default();
        let principal = module.seed_user("ghost", UserRole::User).await;
        let other = MockModule::default();
        let error = other.get_user(&principal).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);
    }
}
