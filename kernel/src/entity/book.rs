mod author;
mod cover_image;
mod description;
mod genre;
mod id;
mod isbn;
mod published_year;
mod rating;
mod title;

pub use self::{
    author::*, cover_image::*, description::*, genre::*, id::*, isbn::*, published_year::*,
    rating::*, title::*,
};
use crate::entity::{CreatedAt, UpdatedAt, UserId};
use destructure::{Destructure, Mutation};
use vodca::References;

/// A catalogued book. `rating` is derived from the book's reviews and is only
/// ever written by recomputation.
#[derive(Debug, Clone, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    description: BookDescription,
    isbn: Option<Isbn>,
    published_year: Option<PublishedYear>,
    genre: Option<Genre>,
    cover_image: Option<CoverImage>,
    rating: BookRating,
    created_by: UserId,
    created_at: CreatedAt<Book>,
    updated_at: UpdatedAt<Book>,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        description: BookDescription,
        isbn: Option<Isbn>,
        published_year: Option<PublishedYear>,
        genre: Option<Genre>,
        cover_image: Option<CoverImage>,
        rating: BookRating,
        created_by: UserId,
        created_at: CreatedAt<Book>,
        updated_at: UpdatedAt<Book>,
    ) -> Self {
        Self {
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
        }
    }
}

/// Book fields shown next to a user's own review.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct ReviewedBook {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
}

impl ReviewedBook {
    pub fn new(id: BookId, title: BookTitle, author: BookAuthor) -> Self {
        Self { id, title, author }
    }
}
