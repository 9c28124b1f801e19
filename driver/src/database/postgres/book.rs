use error_stack::{Report, ResultExt};
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    AverageRating, Book, BookAuthor, BookDescription, BookId, BookRating, BookTitle, CoverImage,
    CreatedAt, Genre, Isbn, PublishedYear, ReviewCount, SelectLimit, SelectPage, UpdatedAt,
    UserId,
};
use kernel::KernelError;

use crate::database::postgres::{contains_pattern, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn lock_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::lock_by_id(con, id).await
    }

    async fn find_by_isbn(
        &self,
        con: &mut PostgresTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_isbn(con, isbn).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        search: Option<&str>,
        limit: &SelectLimit,
        page: &SelectPage,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con, search, limit, page).await
    }

    async fn count_all(
        &self,
        con: &mut PostgresTransaction,
        search: Option<&str>,
    ) -> error_stack::Result<i64, KernelError> {
        PgBookInternal::count_all(con, search).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn update_rating(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
        rating: &BookRating,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update_rating(con, book_id, rating).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con, book_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: String,
    description: String,
    isbn: Option<String>,
    published_year: Option<i32>,
    genre: Option<String>,
    cover_image: Option<String>,
    average_rating: f64,
    review_count: i64,
    created_by: Uuid,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<BookRow> for Book {
    type Error = Report<KernelError>;
    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Book::new(
            BookId::new(row.id),
            BookTitle::new(row.title)?,
            BookAuthor::new(row.author)?,
            BookDescription::new(row.description)?,
            row.isbn.map(Isbn::new).transpose()?,
            row.published_year.map(PublishedYear::new).transpose()?,
            row.genre.map(Genre::new).transpose()?,
            row.cover_image.map(CoverImage::new).transpose()?,
            BookRating::new(
                AverageRating::new(row.average_rating),
                ReviewCount::new(row.review_count),
            ),
            UserId::new(row.created_by),
            CreatedAt::new(row.created_at),
            UpdatedAt::new(row.updated_at),
        ))
    }
}

fn restore(row: Option<BookRow>) -> error_stack::Result<Option<Book>, KernelError> {
    row.map(Book::try_from)
        .transpose()
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable("stored book is malformed")
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, description, isbn, published_year, genre, cover_image,
                   average_rating, review_count, created_by, created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        restore(row)
    }

    async fn lock_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, description, isbn, published_year, genre, cover_image,
                   average_rating, review_count, created_by, created_at, updated_at
            FROM books
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        restore(row)
    }

    async fn find_by_isbn(
        con: &mut PgConnection,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, description, isbn, published_year, genre, cover_image,
                   average_rating, review_count, created_by, created_at, updated_at
            FROM books
            WHERE isbn = $1
            "#,
        )
        .bind(isbn.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        restore(row)
    }

    async fn find_all(
        con: &mut PgConnection,
        search: Option<&str>,
        limit: &SelectLimit,
        page: &SelectPage,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, description, isbn, published_year, genre, cover_image,
                   average_rating, review_count, created_by, created_at, updated_at
            FROM books
            WHERE $1::TEXT IS NULL OR title ILIKE $1 OR author ILIKE $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search.map(contains_pattern))
        .bind(limit.as_ref())
        .bind(page.offset(limit))
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter()
            .map(Book::try_from)
            .collect::<Result<Vec<_>, _>>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("stored book is malformed")
    }

    async fn count_all(
        con: &mut PgConnection,
        search: Option<&str>,
    ) -> error_stack::Result<i64, KernelError> {
        let (count,) = sqlx::query_as::<_, (i64,)>(
            // language=postgresql
            r#"
            SELECT COUNT(*)
            FROM books
            WHERE $1::TEXT IS NULL OR title ILIKE $1 OR author ILIKE $1
            "#,
        )
        .bind(search.map(contains_pattern))
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(count)
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO books (id, title, author, description, isbn, published_year, genre,
                               cover_image, average_rating, review_count, created_by,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.description().as_ref())
        .bind(book.isbn().as_ref().map(AsRef::<String>::as_ref))
        .bind(book.published_year().as_ref().map(AsRef::<i32>::as_ref))
        .bind(book.genre().as_ref().map(AsRef::<String>::as_ref))
        .bind(book.cover_image().as_ref().map(AsRef::<String>::as_ref))
        .bind(book.rating().average().as_ref())
        .bind(book.rating().count().as_ref())
        .bind(book.created_by().as_ref())
        .bind(book.created_at().as_ref())
        .bind(book.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE books
            SET title = $2, author = $3, description = $4, isbn = $5, published_year = $6,
                genre = $7, cover_image = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.description().as_ref())
        .bind(book.isbn().as_ref().map(AsRef::<String>::as_ref))
        .bind(book.published_year().as_ref().map(AsRef::<i32>::as_ref))
        .bind(book.genre().as_ref().map(AsRef::<String>::as_ref))
        .bind(book.cover_image().as_ref().map(AsRef::<String>::as_ref))
        .bind(book.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound).attach_printable("book not found"));
        }
        Ok(())
    }

    async fn update_rating(
        con: &mut PgConnection,
        book_id: &BookId,
        rating: &BookRating,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE books
            SET average_rating = $2, review_count = $3
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .bind(rating.average().as_ref())
        .bind(rating.count().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound).attach_printable("book not found"));
        }
        Ok(())
    }

    async fn delete(con: &mut PgConnection, book_id: &BookId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
