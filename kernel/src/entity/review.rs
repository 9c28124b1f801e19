mod comment;
mod id;
mod rating;

pub use self::{comment::*, id::*, rating::*};
use crate::entity::{BookId, CreatedAt, ReviewedBook, UpdatedAt, UserId, UserName};
use destructure::{Destructure, Mutation};
use vodca::References;

/// A single user's review of a single book. At most one exists per
/// `(book_id, user_id)` pair.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Review {
    id: ReviewId,
    book_id: BookId,
    user_id: UserId,
    rating: ReviewRating,
    comment: ReviewComment,
    created_at: CreatedAt<Review>,
    updated_at: UpdatedAt<Review>,
}

impl Review {
    pub fn new(
        id: ReviewId,
        book_id: BookId,
        user_id: UserId,
        rating: ReviewRating,
        comment: ReviewComment,
        created_at: CreatedAt<Review>,
        updated_at: UpdatedAt<Review>,
    ) -> Self {
        Self {
            id,
            book_id,
            user_id,
            rating,
            comment,
            created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct AuthoredReview {
    review: Review,
    author_name: UserName,
}

impl AuthoredReview {
    pub fn new(review: Review, author_name: UserName) -> Self {
        Self {
            review,
            author_name,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct UserReview {
    review: Review,
    book: ReviewedBook,
}

impl UserReview {
    pub fn new(review: Review, book: ReviewedBook) -> Self {
        Self { review, book }
    }
}
