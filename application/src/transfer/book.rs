use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{Book, DestructBook, DestructBookRating, SelectLimit, SelectPage};

use crate::transfer::ReviewDto;

#[derive(Debug, Clone)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub description: String,
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
    pub cover_image: Option<String>,
    pub average_rating: f64,
    pub review_count: i64,
    pub created_by: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            description,
            isbn,
            published_year,
            genre,
            cover_image,
            rating,
            created_by,
            created_at,
            updated_at,
        } = value.into_destruct();
        let DestructBookRating { average, count } = rating.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            description: description.into(),
            isbn: isbn.map(Into::into),
            published_year: published_year.map(Into::into),
            genre: genre.map(Into::into),
            cover_image: cover_image.map(Into::into),
            average_rating: average.into(),
            review_count: count.into(),
            created_by: created_by.into(),
            created_at: *created_at.as_ref(),
            updated_at: *updated_at.as_ref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookDetailDto {
    pub book: BookDto,
    pub reviews: Vec<ReviewDto>,
}

#[derive(Debug, Clone)]
pub struct BookPageDto {
    pub books: Vec<BookDto>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_books: i64,
}

pub struct GetBookDto {
    pub id: Uuid,
}

pub struct GetAllBookDto {
    pub search: Option<String>,
    pub page: SelectPage,
    pub limit: SelectLimit,
}

pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub description: String,
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
    pub cover_image: Option<String>,
}

/// `None` keeps the stored value. A blank string clears an optional text field.
pub struct UpdateBookDto {
    pub id: Uuid,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
    pub cover_image: Option<String>,
}

pub struct DeleteBookDto {
    pub id: Uuid,
}
