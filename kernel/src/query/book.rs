use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Book, BookId, Isbn, SelectLimit, SelectPage};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    /// Same as [`BookQuery::find_by_id`], but the book stays locked against
    /// concurrent writers until `con` ends.
    async fn lock_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    async fn find_by_isbn(
        &self,
        con: &mut Self::Transaction,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    /// Newest first. `search` matches title or author, case-insensitively.
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        search: Option<&str>,
        limit: &SelectLimit,
        page: &SelectPage,
    ) -> error_stack::Result<Vec<Book>, KernelError>;

    async fn count_all(
        &self,
        con: &mut Self::Transaction,
        search: Option<&str>,
    ) -> error_stack::Result<i64, KernelError>;
}

pub trait DependOnBookQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookQuery: BookQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_query(&self) -> &Self::BookQuery;
}
