use std::sync::Arc;

use error_stack::Report;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use kernel::interface::auth::{
    DependOnPasswordHashing, DependOnPrincipalResolver, DependOnRoleAssignment, PasswordHashing,
    PrincipalResolver, RoleAssignment,
};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnReviewQuery, DependOnUserQuery, ReviewQuery, UserQuery,
};
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnReviewModifier, DependOnUserModifier,
    ReviewModifier, UserModifier,
};
use kernel::prelude::entity::{
    AccessToken, AuthoredReview, Book, BookId, BookRating, CreatedAt, HashedPassword, Isbn,
    Principal, RawPassword, Review, ReviewId, ReviewedBook, SelectLimit, SelectPage, User,
    UserEmail, UserId, UserName, UserReview, UserRole,
};
use kernel::KernelError;

pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Everything the in-memory store holds. Rows are kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub books: Vec<Book>,
    pub reviews: Vec<Review>,
    pub users: Vec<User>,
    pub fail_rating_update: bool,
}

impl MemoryState {
    fn book(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id() == id)
    }

    fn user_name(&self, id: &UserId) -> Option<UserName> {
        self.users
            .iter()
            .find(|user| user.id() == id)
            .map(|user| user.name().clone())
    }

    fn authored(&self, review: &Review) -> Option<AuthoredReview> {
        self.user_name(review.user_id())
            .map(|name| AuthoredReview::new(review.clone(), name))
    }
}

/// One transaction at a time. A transaction works on a copy of the state and
/// only writes it back on commit.
#[derive(Clone, Default)]
pub struct MemoryDatabase(Arc<Mutex<MemoryState>>);

impl MemoryDatabase {
    pub async fn snapshot(&self) -> MemoryState {
        self.0.lock().await.clone()
    }

    pub async fn fail_rating_update(&self, fail: bool) {
        self.0.lock().await.fail_rating_update = fail;
    }

    /// Removes the book row alone, leaving its reviews behind.
    pub async fn drop_book_row(&self, id: Uuid) {
        self.0
            .lock()
            .await
            .books
            .retain(|book| book.id().as_ref() != &id);
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = self.0.clone().lock_owned().await;
        let state = guard.clone();
        Ok(MemoryTransaction { guard, state })
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    state: MemoryState,
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let MemoryTransaction { mut guard, state } = self;
        *guard = state;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

fn missing(what: &str) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("{what} not found"))
}

pub struct MemoryRepository;

#[async_trait::async_trait]
impl BookQuery for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.state.book(id).cloned())
    }

    async fn lock_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.state.book(id).cloned())
    }

    async fn find_by_isbn(
        &self,
        con: &mut MemoryTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con
            .state
            .books
            .iter()
            .find(|book| book.isbn().as_ref() == Some(isbn))
            .cloned())
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        search: Option<&str>,
        limit: &SelectLimit,
        page: &SelectPage,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let skip = usize::try_from(page.offset(limit)).unwrap_or(usize::MAX);
        let take = usize::try_from(*limit.as_ref()).unwrap_or(0);
        Ok(matching(&con.state.books, search)
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn count_all(
        &self,
        con: &mut MemoryTransaction,
        search: Option<&str>,
    ) -> error_stack::Result<i64, KernelError> {
        Ok(matching(&con.state.books, search).count() as i64)
    }
}

fn matching<'a>(books: &'a [Book], search: Option<&'a str>) -> impl Iterator<Item = &'a Book> {
    let search = search.map(str::to_lowercase);
    books.iter().rev().filter(move |book| match &search {
        Some(search) => {
            book.title().as_ref().to_lowercase().contains(search)
                || book.author().as_ref().to_lowercase().contains(search)
        }
        None => true,
    })
}

#[async_trait::async_trait]
impl BookModifier for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.state.books.push(book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let stored = con
            .state
            .books
            .iter_mut()
            .find(|stored| stored.id() == book.id())
            .ok_or_else(|| missing("book"))?;
        let rating = stored.rating().clone();
        *stored = book.clone();
        stored.substitute(|stored| *stored.rating = rating);
        Ok(())
    }

    async fn update_rating(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
        rating: &BookRating,
    ) -> error_stack::Result<(), KernelError> {
        if con.state.fail_rating_update {
            return Err(Report::new(KernelError::Internal).attach_printable("storage unavailable"));
        }
        let stored = con
            .state
            .books
            .iter_mut()
            .find(|stored| stored.id() == book_id)
            .ok_or_else(|| missing("book"))?;
        stored.substitute(|stored| *stored.rating = rating.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        con.state.books.retain(|book| book.id() != book_id);
        con.state.reviews.retain(|review| review.book_id() != book_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ReviewQuery for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &ReviewId,
    ) -> error_stack::Result<Option<Review>, KernelError> {
        Ok(con
            .state
            .reviews
            .iter()
            .find(|review| review.id() == id)
            .cloned())
    }

    async fn find_by_book_and_user(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
        user_id: &UserId,
    ) -> error_stack::Result<Option<Review>, KernelError> {
        Ok(con
            .state
            .reviews
            .iter()
            .find(|review| review.book_id() == book_id && review.user_id() == user_id)
            .cloned())
    }

    async fn find_by_book_id(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        Ok(con
            .state
            .reviews
            .iter()
            .rev()
            .filter(|review| review.book_id() == book_id)
            .cloned()
            .collect())
    }

    async fn find_authored_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &ReviewId,
    ) -> error_stack::Result<Option<AuthoredReview>, KernelError> {
        let state = &con.state;
        Ok(state
            .reviews
            .iter()
            .find(|review| review.id() == id)
            .and_then(|review| state.authored(review)))
    }

    async fn find_authored_by_book_id(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<AuthoredReview>, KernelError> {
        let state = &con.state;
        Ok(state
            .reviews
            .iter()
            .rev()
            .filter(|review| review.book_id() == book_id)
            .filter_map(|review| state.authored(review))
            .collect())
    }

    async fn find_by_user_id(
        &self,
        con: &mut MemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<UserReview>, KernelError> {
        let state = &con.state;
        Ok(state
            .reviews
            .iter()
            .rev()
            .filter(|review| review.user_id() == user_id)
            .filter_map(|review| {
                state.book(review.book_id()).map(|book| {
                    let book =
                        ReviewedBook::new(book.id().clone(), book.title().clone(), book.author().clone());
                    UserReview::new(review.clone(), book)
                })
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl ReviewModifier for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        review: &Review,
    ) -> error_stack::Result<(), KernelError> {
        let duplicate = con.state.reviews.iter().any(|stored| {
            stored.book_id() == review.book_id() && stored.user_id() == review.user_id()
        });
        if duplicate {
            return Err(Report::new(KernelError::Conflict).attach_printable("duplicate review"));
        }
        con.state.reviews.push(review.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        review: &Review,
    ) -> error_stack::Result<(), KernelError> {
        let stored = con
            .state
            .reviews
            .iter_mut()
            .find(|stored| stored.id() == review.id())
            .ok_or_else(|| missing("review"))?;
        *stored = review.clone();
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        review_id: &ReviewId,
    ) -> error_stack::Result<(), KernelError> {
        let before = con.state.reviews.len();
        con.state.reviews.retain(|review| review.id() != review_id);
        if con.state.reviews.len() == before {
            return Err(missing("review"));
        }
        Ok(())
    }

    async fn delete_by_book_id(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<u64, KernelError> {
        let before = con.state.reviews.len();
        con.state.reviews.retain(|review| review.book_id() != book_id);
        Ok((before - con.state.reviews.len()) as u64)
    }
}

#[async_trait::async_trait]
impl UserQuery for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.state.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_email(
        &self,
        con: &mut MemoryTransaction,
        email: &UserEmail,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con
            .state
            .users
            .iter()
            .find(|user| user.email() == email)
            .cloned())
    }
}

#[async_trait::async_trait]
impl UserModifier for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        if con.state.users.iter().any(|stored| stored.email() == user.email()) {
            return Err(Report::new(KernelError::Conflict).attach_printable("duplicate email"));
        }
        con.state.users.push(user.clone());
        Ok(())
    }
}

/// Tokens are `{user id}:{role}` and hashes are the password behind a prefix.
pub struct FakeAuth;

impl PrincipalResolver for FakeAuth {
    fn issue(&self, principal: &Principal) -> error_stack::Result<AccessToken, KernelError> {
        Ok(AccessToken::new(format!(
            "{}:{}",
            principal.id().as_ref(),
            principal.role()
        )))
    }

    fn resolve(&self, credential: &str) -> error_stack::Result<Principal, KernelError> {
        let rejected = || Report::new(KernelError::Unauthenticated);
        let (id, role) = credential.split_once(':').ok_or_else(rejected)?;
        let id = Uuid::parse_str(id).map_err(|_| rejected())?;
        let role = role.parse::<UserRole>().map_err(|_| rejected())?;
        Ok(Principal::new(UserId::new(id), role))
    }
}

impl PasswordHashing for FakeAuth {
    fn hash(&self, password: &RawPassword) -> error_stack::Result<HashedPassword, KernelError> {
        Ok(HashedPassword::new(format!("plain${}", password.as_ref())))
    }

    fn verify(
        &self,
        password: &RawPassword,
        hashed: &HashedPassword,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(*hashed.as_ref() == format!("plain${}", password.as_ref()))
    }
}

impl RoleAssignment for FakeAuth {
    fn role_for(&self, email: &UserEmail) -> UserRole {
        if email.as_ref() == ADMIN_EMAIL {
            UserRole::Admin
        } else {
            UserRole::User
        }
    }
}

#[derive(Clone, Default)]
pub struct MockModule {
    database: MemoryDatabase,
}

impl MockModule {
    pub fn database(&self) -> &MemoryDatabase {
        &self.database
    }

    /// Stores an account directly and returns its principal.
    pub async fn seed_user(&self, name: &str, role: UserRole) -> Principal {
        let id = UserId::new(Uuid::new_v4());
        let user = User::new(
            id.clone(),
            UserName::new(name).unwrap(),
            UserEmail::new(format!("{}@example.com", id.as_ref())).unwrap(),
            HashedPassword::new("plain$secret"),
            role,
            CreatedAt::now(),
        );
        let principal = user.principal();
        self.database.0.lock().await.users.push(user);
        principal
    }
}

impl DependOnDatabaseConnection for MockModule {
    type DatabaseConnection = MemoryDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.database
    }
}

impl DependOnBookQuery for MockModule {
    type BookQuery = MemoryRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &MemoryRepository
    }
}

impl DependOnBookModifier for MockModule {
    type BookModifier = MemoryRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &MemoryRepository
    }
}

impl DependOnReviewQuery for MockModule {
    type ReviewQuery = MemoryRepository;
    fn review_query(&self) -> &Self::ReviewQuery {
        &MemoryRepository
    }
}

impl DependOnReviewModifier for MockModule {
    type ReviewModifier = MemoryRepository;
    fn review_modifier(&self) -> &Self::ReviewModifier {
        &MemoryRepository
    }
}

impl DependOnUserQuery for MockModule {
    type UserQuery = MemoryRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &MemoryRepository
    }
}

impl DependOnUserModifier for MockModule {
    type UserModifier = MemoryRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &MemoryRepository
    }
}

impl DependOnPrincipalResolver for MockModule {
    type PrincipalResolver = FakeAuth;
    fn principal_resolver(&self) -> &Self::PrincipalResolver {
        &FakeAuth
    }
}

impl DependOnPasswordHashing for MockModule {
    type PasswordHashing = FakeAuth;
    fn password_hashing(&self) -> &Self::PasswordHashing {
        &FakeAuth
    }
}

impl DependOnRoleAssignment for MockModule {
    type RoleAssignment = FakeAuth;
    fn role_assignment(&self) -> &Self::RoleAssignment {
        &FakeAuth
    }
}
