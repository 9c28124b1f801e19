use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery, DependOnReviewQuery, ReviewQuery};
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnReviewModifier, ReviewModifier,
};
use kernel::prelude::entity::{
    Book, BookAuthor, BookDescription, BookId, BookRating, BookTitle, CoverImage, CreatedAt,
    Genre, Isbn, Principal, PublishedYear, SelectPage, UpdatedAt,
};
use kernel::KernelError;

use crate::service::authorize::require_admin;
use crate::transfer::{
    BookDetailDto, BookDto, BookPageDto, CreateBookDto, DeleteBookDto, GetAllBookDto, GetBookDto,
    ReviewDto, UpdateBookDto,
};

fn book_not_found(id: &BookId) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("book {} not found", id.as_ref()))
}

/// Blank optional text is treated as absent.
fn optional<T>(
    value: Option<String>,
    parse: impl FnOnce(String) -> error_stack::Result<T, KernelError>,
) -> error_stack::Result<Option<T>, KernelError> {
    match value {
        Some(value) if !value.trim().is_empty() => parse(value).map(Some),
        _ => Ok(None),
    }
}

#[async_trait::async_trait]
pub trait GetBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery + DependOnReviewQuery
{
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<BookDetailDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| book_not_found(&id))?;
        let reviews = self
            .review_query()
            .find_authored_by_book_id(&mut connection, &id)
            .await?;

        Ok(BookDetailDto {
            book: BookDto::from(book),
            reviews: reviews.into_iter().map(ReviewDto::from).collect(),
        })
    }
}

impl<T> GetBookService for T where
    T: DependOnDatabaseConnection + DependOnBookQuery + DependOnReviewQuery
{
}

#[async_trait::async_trait]
pub trait GetAllBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_all_books(
        &self,
        dto: GetAllBookDto,
    ) -> error_stack::Result<BookPageDto, KernelError> {
        dto.page.validate()?;
        dto.limit.validate()?;
        let search = dto
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty());

        let mut connection = self.database_connection().transact().await?;

        let books = self
            .book_query()
            .find_all(&mut connection, search, &dto.limit, &dto.page)
            .await?;
        let total = self.book_query().count_all(&mut connection, search).await?;

        Ok(BookPageDto {
            books: books.into_iter().map(BookDto::from).collect(),
            current_page: *dto.page.as_ref(),
            total_pages: SelectPage::count(total, &dto.limit),
            total_books: total,
        })
    }
}

impl<T> GetAllBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    async fn create_book(
        &self,
        principal: &Principal,
        dto: CreateBookDto,
    ) -> error_stack::Result<BookDto, KernelError> {
        require_admin(principal)?;

        let title = BookTitle::new(dto.title)?;
        let author = BookAuthor::new(dto.author)?;
        let description = BookDescription::new(dto.description)?;
        let isbn = optional(dto.isbn, Isbn::new)?;
        let published_year = dto.published_year.map(PublishedYear::new).transpose()?;
        let genre = optional(dto.genre, Genre::new)?;
        let cover_image = optional(dto.cover_image, CoverImage::new)?;

        let mut connection = self.database_connection().transact().await?;

        if let Some(isbn) = &isbn {
            if self
                .book_query()
                .find_by_isbn(&mut connection, isbn)
                .await?
                .is_some()
            {
                return Err(Report::new(KernelError::Conflict)
                    .attach_printable(format!("isbn {} already exists", isbn.as_ref())));
            }
        }

        let now = OffsetDateTime::now_utc();
        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            title,
            author,
            description,
            isbn,
            published_year,
            genre,
            cover_image,
            BookRating::empty(),
            principal.id().clone(),
            CreatedAt::new(now),
            UpdatedAt::new(now),
        );
        self.book_modifier().create(&mut connection, &book).await?;
        connection.commit().await?;

        tracing::info!(book_id = %book.id().as_ref(), "Created book");
        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    async fn update_book(
        &self,
        principal: &Principal,
        dto: UpdateBookDto,
    ) -> error_stack::Result<BookDto, KernelError> {
        require_admin(principal)?;

        let title = dto.title.map(BookTitle::new).transpose()?;
        let author = dto.author.map(BookAuthor::new).transpose()?;
        let description = dto.description.map(BookDescription::new).transpose()?;
        let isbn = dto
            .isbn
            .map(|isbn| optional(Some(isbn), Isbn::new))
            .transpose()?;
        let published_year = dto.published_year.map(PublishedYear::new).transpose()?;
        let genre = dto
            .genre
            .map(|genre| optional(Some(genre), Genre::new))
            .transpose()?;
        let cover_image = dto
            .cover_image
            .map(|cover| optional(Some(cover), CoverImage::new))
            .transpose()?;

        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let mut book = self
            .book_query()
            .lock_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| book_not_found(&id))?;

        if let Some(Some(isbn)) = &isbn {
            let owner = self.book_query().find_by_isbn(&mut connection, isbn).await?;
            if owner.is_some_and(|owner| owner.id() != &id) {
                return Err(Report::new(KernelError::Conflict)
                    .attach_printable(format!("isbn {} already exists", isbn.as_ref())));
            }
        }

        book.substitute(|book| {
            if let Some(title) = title {
                *book.title = title;
            }
            if let Some(author) = author {
                *book.author = author;
            }
            if let Some(description) = description {
                *book.description = description;
            }
            if let Some(isbn) = isbn {
                *book.isbn = isbn;
            }
            if let Some(published_year) = published_year {
                *book.published_year = Some(published_year);
            }
            if let Some(genre) = genre {
                *book.genre = genre;
            }
            if let Some(cover_image) = cover_image {
                *book.cover_image = cover_image;
            }
            *book.updated_at = UpdatedAt::now();
        });
        self.book_modifier().update(&mut connection, &book).await?;
        connection.commit().await?;

        tracing::info!(book_id = %id.as_ref(), "Updated book");
        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier + DependOnReviewModifier
{
    /// Removes the book together with every review of it.
    async fn delete_book(
        &self,
        principal: &Principal,
        dto: DeleteBookDto,
    ) -> error_stack::Result<(), KernelError> {
        require_admin(principal)?;

        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        self.book_query()
            .lock_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| book_not_found(&id))?;

        let removed = self
            .review_modifier()
            .delete_by_book_id(&mut connection, &id)
            .await?;
        self.book_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!(book_id = %id.as_ref(), removed_reviews = removed, "Deleted book");
        Ok(())
    }
}

impl<T> DeleteBookService for T where
    T: DependOnBookQuery + DependOnBookModifier + DependOnReviewModifier
{
}
