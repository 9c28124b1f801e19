use std::ops::{Deref, DerefMut};

use error_stack::{Report, ResultExt};
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{book::*, review::*, user::*};

mod book;
mod review;
mod user;

static POSTGRES_URL: &str = "POSTGRES_URL";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    /// Connects to `POSTGRES_URL` and brings the schema up to date.
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        sqlx::migrate!()
            .run(&pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("failed to apply migrations")?;
        tracing::debug!("Connected to postgres");
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(database) if database.is_unique_violation() => {
                    KernelError::Conflict
                }
                Error::Database(database) if database.is_foreign_key_violation() => {
                    KernelError::NotFound
                }
                _ => KernelError::Internal,
            };
            Report::new(error).change_context(context)
        })
    }
}

/// `%term%` for ILIKE, with the pattern metacharacters of `term` escaped.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
pub(in crate::database) mod fixture {
    use time::OffsetDateTime;
    use uuid::Uuid;

    use kernel::prelude::entity::{
        Book, BookAuthor, BookDescription, BookId, BookRating, BookTitle, CreatedAt, Genre,
        HashedPassword, PublishedYear, UpdatedAt, User, UserEmail, UserId, UserName, UserRole,
    };

    /// Postgres keeps microseconds only.
    fn now() -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        now.replace_microsecond(now.microsecond()).unwrap()
    }

    pub fn user() -> User {
        let id = UserId::new(Uuid::new_v4());
        User::new(
            id.clone(),
            UserName::new("tester").unwrap(),
            UserEmail::new(format!("{}@example.com", id.as_ref())).unwrap(),
            HashedPassword::new("hash"),
            UserRole::Admin,
            CreatedAt::new(now()),
        )
    }

    pub fn book(created_by: &UserId, title: &str) -> Book {
        let now = now();
        Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(title).unwrap(),
            BookAuthor::new("Ursula K. Le Guin").unwrap(),
            BookDescription::new("A book stored by the repository tests.").unwrap(),
            None,
            Some(PublishedYear::new(1969).unwrap()),
            Some(Genre::new("Science Fiction").unwrap()),
            None,
            BookRating::empty(),
            created_by.clone(),
            CreatedAt::new(now),
            UpdatedAt::new(now),
        )
    }
}

#[cfg(test)]
mod test {
    use super::contains_pattern;

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(contains_pattern("dune"), "%dune%");
        assert_eq!(contains_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }
}
