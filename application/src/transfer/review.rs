use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{
    AuthoredReview, DestructAuthoredReview, DestructReview, DestructReviewedBook,
    DestructUserReview, UserReview,
};

#[derive(Debug, Clone)]
pub struct ReviewDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub author_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<AuthoredReview> for ReviewDto {
    fn from(value: AuthoredReview) -> Self {
        let DestructAuthoredReview {
            review,
            author_name,
        } = value.into_destruct();
        let DestructReview {
            id,
            book_id,
            user_id,
            rating,
            comment,
            created_at,
            updated_at,
        } = review.into_destruct();
        Self {
            id: id.into(),
            book_id: book_id.into(),
            user_id: user_id.into(),
            author_name: author_name.into(),
            rating: rating.into(),
            comment: comment.into(),
            created_at: *created_at.as_ref(),
            updated_at: *updated_at.as_ref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewedBookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
}

/// A review listed on its author's own page, carrying the reviewed book.
#[derive(Debug, Clone)]
pub struct UserReviewDto {
    pub id: Uuid,
    pub book: ReviewedBookDto,
    pub rating: i32,
    pub comment: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<UserReview> for UserReviewDto {
    fn from(value: UserReview) -> Self {
        let DestructUserReview { review, book } = value.into_destruct();
        let DestructReview {
            id,
            rating,
            comment,
            created_at,
            updated_at,
            ..
        } = review.into_destruct();
        let DestructReviewedBook { id: book_id, title, author } = book.into_destruct();
        Self {
            id: id.into(),
            book: ReviewedBookDto {
                id: book_id.into(),
                title: title.into(),
                author: author.into(),
            },
            rating: rating.into(),
            comment: comment.into(),
            created_at: *created_at.as_ref(),
            updated_at: *updated_at.as_ref(),
        }
    }
}

pub struct GetBookReviewsDto {
    pub book_id: Uuid,
}

pub struct CreateReviewDto {
    pub book_id: Uuid,
    pub rating: i32,
    pub comment: String,
}

pub struct UpdateReviewDto {
    pub id: Uuid,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

pub struct DeleteReviewDto {
    pub id: Uuid,
}
