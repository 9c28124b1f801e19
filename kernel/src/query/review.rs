use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{AuthoredReview, BookId, Review, ReviewId, UserId, UserReview};
use crate::KernelError;

/// Listing methods return the most recent review first.
#[async_trait::async_trait]
pub trait ReviewQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &ReviewId,
    ) -> error_stack::Result<Option<Review>, KernelError>;

    async fn find_by_book_and_user(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
        user_id: &UserId,
    ) -> error_stack::Result<Option<Review>, KernelError>;

    async fn find_by_book_id(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Review>, KernelError>;

    async fn find_authored_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &ReviewId,
    ) -> error_stack::Result<Option<AuthoredReview>, KernelError>;

    async fn find_authored_by_book_id(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<AuthoredReview>, KernelError>;

    async fn find_by_user_id(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<UserReview>, KernelError>;
}

pub trait DependOnReviewQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type ReviewQuery: ReviewQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn review_query(&self) -> &Self::ReviewQuery;
}
