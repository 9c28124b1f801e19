use std::ops::Deref;
use std::sync::Arc;

use vodca::References;

use driver::auth::{Argon2PasswordHashing, EnvRoleAssignment, JwtPrincipalResolver};
use driver::database::{
    PostgresBookRepository, PostgresDatabase, PostgresReviewRepository, PostgresUserRepository,
};
use kernel::interface::auth::{
    DependOnPasswordHashing, DependOnPrincipalResolver, DependOnRoleAssignment,
};
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{DependOnBookQuery, DependOnReviewQuery, DependOnUserQuery};
use kernel::interface::update::{
    DependOnBookModifier, DependOnReviewModifier, DependOnUserModifier,
};
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
    jwt: JwtPrincipalResolver,
    hashing: Argon2PasswordHashing,
    roles: EnvRoleAssignment,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let jwt = JwtPrincipalResolver::from_env()?;
        let roles = EnvRoleAssignment::from_env();
        let pgpool = PostgresDatabase::new().await?;

        Ok(Self {
            pgpool,
            jwt,
            hashing: Argon2PasswordHashing,
            roles,
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.pgpool
    }
}

impl DependOnBookQuery for Handler {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for Handler {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnReviewQuery for Handler {
    type ReviewQuery = PostgresReviewRepository;
    fn review_query(&self) -> &Self::ReviewQuery {
        &PostgresReviewRepository
    }
}

impl DependOnReviewModifier for Handler {
    type ReviewModifier = PostgresReviewRepository;
    fn review_modifier(&self) -> &Self::ReviewModifier {
        &PostgresReviewRepository
    }
}

impl DependOnUserQuery for Handler {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnUserModifier for Handler {
    type UserModifier = PostgresUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &PostgresUserRepository
    }
}

impl DependOnPrincipalResolver for Handler {
    type PrincipalResolver = JwtPrincipalResolver;
    fn principal_resolver(&self) -> &Self::PrincipalResolver {
        &self.jwt
    }
}

impl DependOnPasswordHashing for Handler {
    type PasswordHashing = Argon2PasswordHashing;
    fn password_hashing(&self) -> &Self::PasswordHashing {
        &self.hashing
    }
}

impl DependOnRoleAssignment for Handler {
    type RoleAssignment = EnvRoleAssignment;
    fn role_assignment(&self) -> &Self::RoleAssignment {
        &self.roles
    }
}
