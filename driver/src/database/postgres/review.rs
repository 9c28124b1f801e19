use error_stack::{Report, ResultExt};
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::ReviewQuery;
use kernel::interface::update::ReviewModifier;
use kernel::prelude::entity::{
    AuthoredReview, BookAuthor, BookId, BookTitle, CreatedAt, Review, ReviewComment, ReviewId,
    ReviewRating, ReviewedBook, UpdatedAt, UserId, UserName, UserReview,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresReviewRepository;

#[async_trait::async_trait]
impl ReviewQuery for PostgresReviewRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &ReviewId,
    ) -> error_stack::Result<Option<Review>, KernelError> {
        PgReviewInternal::find_by_id(con, id).await
    }

    async fn find_by_book_and_user(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
        user_id: &UserId,
    ) -> error_stack::Result<Option<Review>, KernelError> {
        PgReviewInternal::find_by_book_and_user(con, book_id, user_id).await
    }

    async fn find_by_book_id(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        PgReviewInternal::find_by_book_id(con, book_id).await
    }

    async fn find_authored_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &ReviewId,
    ) -> error_stack::Result<Option<AuthoredReview>, KernelError> {
        PgReviewInternal::find_authored_by_id(con, id).await
    }

    async fn find_authored_by_book_id(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<AuthoredReview>, KernelError> {
        PgReviewInternal::find_authored_by_book_id(con, book_id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<UserReview>, KernelError> {
        PgReviewInternal::find_by_user_id(con, user_id).await
    }
}

#[async_trait::async_trait]
impl ReviewModifier for PostgresReviewRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        review: &Review,
    ) -> error_stack::Result<(), KernelError> {
        PgReviewInternal::create(con, review).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        review: &Review,
    ) -> error_stack::Result<(), KernelError> {
        PgReviewInternal::update(con, review).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        review_id: &ReviewId,
    ) -> error_stack::Result<(), KernelError> {
        PgReviewInternal::delete(con, review_id).await
    }

    async fn delete_by_book_id(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<u64, KernelError> {
        PgReviewInternal::delete_by_book_id(con, book_id).await
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    book_id: Uuid,
    user_id: Uuid,
    rating: i32,
    comment: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<ReviewRow> for Review {
    type Error = Report<KernelError>;
    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review::new(
            ReviewId::new(row.id),
            BookId::new(row.book_id),
            UserId::new(row.user_id),
            ReviewRating::new(row.rating)?,
            ReviewComment::new(row.comment)?,
            CreatedAt::new(row.created_at),
            UpdatedAt::new(row.updated_at),
        ))
    }
}

#[derive(sqlx::FromRow)]
struct AuthoredReviewRow {
    #[sqlx(flatten)]
    review: ReviewRow,
    author_name: String,
}

impl TryFrom<AuthoredReviewRow> for AuthoredReview {
    type Error = Report<KernelError>;
    fn try_from(row: AuthoredReviewRow) -> Result<Self, Self::Error> {
        Ok(AuthoredReview::new(
            Review::try_from(row.review)?,
            UserName::new(row.author_name)?,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct UserReviewRow {
    #[sqlx(flatten)]
    review: ReviewRow,
    book_title: String,
    book_author: String,
}

impl TryFrom<UserReviewRow> for UserReview {
    type Error = Report<KernelError>;
    fn try_from(row: UserReviewRow) -> Result<Self, Self::Error> {
        let book = ReviewedBook::new(
            BookId::new(row.review.book_id),
            BookTitle::new(row.book_title)?,
            BookAuthor::new(row.book_author)?,
        );
        Ok(UserReview::new(Review::try_from(row.review)?, book))
    }
}

fn restore<R, T>(rows: Vec<R>) -> error_stack::Result<Vec<T>, KernelError>
where
    T: TryFrom<R, Error = Report<KernelError>>,
{
    rows.into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>, _>>()
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable("stored review is malformed")
}

fn restore_one<R, T>(row: Option<R>) -> error_stack::Result<Option<T>, KernelError>
where
    T: TryFrom<R, Error = Report<KernelError>>,
{
    row.map(T::try_from)
        .transpose()
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable("stored review is malformed")
}

fn review_not_found(id: &ReviewId) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach_printable(format!("review {} not found", id.as_ref()))
}

pub(in crate::database) struct PgReviewInternal;

impl PgReviewInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &ReviewId,
    ) -> error_stack::Result<Option<Review>, KernelError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, user_id, rating, comment, created_at, updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        restore_one(row)
    }

    async fn find_by_book_and_user(
        con: &mut PgConnection,
        book_id: &BookId,
        user_id: &UserId,
    ) -> error_stack::Result<Option<Review>, KernelError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, user_id, rating, comment, created_at, updated_at
            FROM reviews
            WHERE book_id = $1 AND user_id = $2
            "#,
        )
        .bind(book_id.as_ref())
        .bind(user_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        restore_one(row)
    }

    async fn find_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, user_id, rating, comment, created_at, updated_at
            FROM reviews
            WHERE book_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        restore(rows)
    }

    async fn find_authored_by_id(
        con: &mut PgConnection,
        id: &ReviewId,
    ) -> error_stack::Result<Option<AuthoredReview>, KernelError> {
        let row = sqlx::query_as::<_, AuthoredReviewRow>(
            // language=postgresql
            r#"
            SELECT r.id, r.book_id, r.user_id, r.rating, r.comment, r.created_at, r.updated_at,
                   u.name AS author_name
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        restore_one(row)
    }

    async fn find_authored_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<AuthoredReview>, KernelError> {
        let rows = sqlx::query_as::<_, AuthoredReviewRow>(
            // language=postgresql
            r#"
            SELECT r.id, r.book_id, r.user_id, r.rating, r.comment, r.created_at, r.updated_at,
                   u.name AS author_name
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.book_id = $1
            ORDER BY r.created_at DESC, r.id DESC
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        restore(rows)
    }

    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<UserReview>, KernelError> {
        let rows = sqlx::query_as::<_, UserReviewRow>(
            // language=postgresql
            r#"
            SELECT r.id, r.book_id, r.user_id, r.rating, r.comment, r.created_at, r.updated_at,
                   b.title AS book_title, b.author AS book_author
            FROM reviews r
            JOIN books b ON b.id = r.book_id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC, r.id DESC
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        restore(rows)
    }

    async fn create(con: &mut PgConnection, review: &Review) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO reviews (id, book_id, user_id, rating, comment, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(review.id().as_ref())
        .bind(review.book_id().as_ref())
        .bind(review.user_id().as_ref())
        .bind(review.rating().as_ref())
        .bind(review.comment().as_ref())
        .bind(review.created_at().as_ref())
        .bind(review.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()
        .map_err(|report| {
            if report.current_context() == &KernelError::Conflict {
                report.attach_printable("you have already reviewed this book")
            } else {
                report
            }
        })?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, review: &Review) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE reviews
            SET rating = $2, comment = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(review.id().as_ref())
        .bind(review.rating().as_ref())
        .bind(review.comment().as_ref())
        .bind(review.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(review_not_found(review.id()));
        }
        Ok(())
    }

    async fn delete(con: &mut PgConnection, review_id: &ReviewId) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(review_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(review_not_found(review_id));
        }
        Ok(())
    }

    async fn delete_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<u64, KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM reviews
            WHERE book_id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected())
    }
}
