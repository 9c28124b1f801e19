use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{ReviewDto, UserReviewDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    id: Uuid,
    book_id: Uuid,
    user_id: Uuid,
    author_name: String,
    rating: i32,
    comment: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<ReviewDto> for ReviewResponse {
    fn from(value: ReviewDto) -> Self {
        Self {
            id: value.id,
            book_id: value.book_id,
            user_id: value.user_id,
            author_name: value.author_name,
            rating: value.rating,
            comment: value.comment,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewedBookResponse {
    id: Uuid,
    title: String,
    author: String,
}

#[derive(Debug, Serialize)]
pub struct UserReviewResponse {
    id: Uuid,
    book: ReviewedBookResponse,
    rating: i32,
    comment: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<UserReviewDto> for UserReviewResponse {
    fn from(value: UserReviewDto) -> Self {
        Self {
            id: value.id,
            book: ReviewedBookResponse {
                id: value.book.id,
                title: value.book.title,
                author: value.book.author,
            },
            rating: value.rating,
            comment: value.comment,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewMessageResponse {
    message: &'static str,
    review: ReviewResponse,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

pub struct CreatedResponse(ReviewMessageResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct Created(pub ReviewDto);

pub struct Updated(pub ReviewDto);

pub struct Presenter;

impl Exhaust<Vec<ReviewDto>> for Presenter {
    type To = Json<Vec<ReviewResponse>>;
    fn emit(&self, input: Vec<ReviewDto>) -> Self::To {
        Json(input.into_iter().map(ReviewResponse::from).collect())
    }
}

impl Exhaust<Vec<UserReviewDto>> for Presenter {
    type To = Json<Vec<UserReviewResponse>>;
    fn emit(&self, input: Vec<UserReviewDto>) -> Self::To {
        Json(input.into_iter().map(UserReviewResponse::from).collect())
    }
}

impl Exhaust<Created> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: Created) -> Self::To {
        CreatedResponse(ReviewMessageResponse {
            message: "Review added successfully",
            review: input.0.into(),
        })
    }
}

impl Exhaust<Updated> for Presenter {
    type To = Json<ReviewMessageResponse>;
    fn emit(&self, input: Updated) -> Self::To {
        Json(ReviewMessageResponse {
            message: "Review updated successfully",
            review: input.0.into(),
        })
    }
}

impl Exhaust<()> for Presenter {
    type To = Json<MessageResponse>;
    fn emit(&self, _: ()) -> Self::To {
        Json(MessageResponse {
            message: "Review deleted successfully",
        })
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use application::transfer::{ReviewDto, ReviewedBookDto, UserReviewDto};

    use super::{Created, Presenter};
    use crate::controller::Exhaust;

    #[test]
    fn created_review_answers_201() {
        let now = OffsetDateTime::now_utc();
        let review = ReviewDto {
            id: Uuid::new_v4(),
            book_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            author_name: "alice".to_string(),
            rating: 4,
            comment: "Worth reading".to_string(),
            created_at: now,
            updated_at: now,
        };
        let response = Presenter.emit(Created(review)).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn own_reviews_nest_the_book() {
        let now = OffsetDateTime::now_utc();
        let book_id = Uuid::new_v4();
        let review = UserReviewDto {
            id: Uuid::new_v4(),
            book: ReviewedBookDto {
                id: book_id,
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
            },
            rating: 5,
            comment: "Classic".to_string(),
            created_at: now,
            updated_at: now,
        };
        let body = serde_json::to_value(&Presenter.emit(vec![review]).0).unwrap();
        assert_eq!(body[0]["book"]["id"], book_id.to_string());
        assert_eq!(body[0]["book"]["title"], "Dune");
        assert_eq!(body[0]["rating"], 5);
    }
}
