use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{BookDetailDto, BookDto, BookPageDto};

use crate::controller::Exhaust;
use crate::route::review::response::ReviewResponse;

#[derive(Debug, Serialize)]
pub struct BookResponse {
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
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            description: value.description,
            isbn: value.isbn,
            published_year: value.published_year,
            genre: value.genre,
            cover_image: value.cover_image,
            average_rating: value.average_rating,
            review_count: value.review_count,
            created_by: value.created_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookDetailResponse {
    #[serde(flatten)]
    book: BookResponse,
    reviews: Vec<ReviewResponse>,
}

#[derive(Debug, Serialize)]
pub struct PaginationResponse {
    current_page: i64,
    total_pages: i64,
    total_books: i64,
}

#[derive(Debug, Serialize)]
pub struct BookPageResponse {
    books: Vec<BookResponse>,
    pagination: PaginationResponse,
}

#[derive(Debug, Serialize)]
pub struct BookMessageResponse {
    message: &'static str,
    book: BookResponse,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

pub struct CreatedResponse(BookMessageResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// Output of a successful create, presented with `201 Created`.
pub struct Created(pub BookDto);

/// Output of a successful update.
pub struct Updated(pub BookDto);

pub struct Presenter;

impl Exhaust<BookPageDto> for Presenter {
    type To = Json<BookPageResponse>;
    fn emit(&self, input: BookPageDto) -> Self::To {
        Json(BookPageResponse {
            books: input.books.into_iter().map(BookResponse::from).collect(),
            pagination: PaginationResponse {
                current_page: input.current_page,
                total_pages: input.total_pages,
                total_books: input.total_books,
            },
        })
    }
}

impl Exhaust<BookDetailDto> for Presenter {
    type To = Json<BookDetailResponse>;
    fn emit(&self, input: BookDetailDto) -> Self::To {
        Json(BookDetailResponse {
            book: input.book.into(),
            reviews: input.reviews.into_iter().map(ReviewResponse::from).collect(),
        })
    }
}

impl Exhaust<Created> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: Created) -> Self::To {
        CreatedResponse(BookMessageResponse {
            message: "Book added successfully",
            book: input.0.into(),
        })
    }
}

impl Exhaust<Updated> for Presenter {
    type To = Json<BookMessageResponse>;
    fn emit(&self, input: Updated) -> Self::To {
        Json(BookMessageResponse {
            message: "Book updated successfully",
            book: input.0.into(),
        })
    }
}

impl Exhaust<()> for Presenter {
    type To = Json<MessageResponse>;
    fn emit(&self, _: ()) -> Self::To {
        Json(MessageResponse {
            message: "Book and associated reviews deleted successfully",
        })
    }
}
