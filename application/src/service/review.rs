use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery, DependOnReviewQuery, ReviewQuery};
use kernel::interface::update::{DependOnReviewModifier, ReviewModifier};
use kernel::prelude::entity::{
    BookId, CreatedAt, Principal, Review, ReviewComment, ReviewId, ReviewRating, UpdatedAt,
};
use kernel::KernelError;

use crate::service::authorize::require_author;
use crate::service::RecomputeRatingService;
use crate::transfer::{
    CreateReviewDto, DeleteReviewDto, GetBookReviewsDto, ReviewDto, UpdateReviewDto,
    UserReviewDto,
};

fn book_not_found(id: &BookId) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("book {} not found", id.as_ref()))
}

fn vanished(id: &ReviewId) -> Report<KernelError> {
    Report::new(KernelError::Internal)
        .attach_printable(format!("review {} disappeared inside its own transaction", id.as_ref()))
}

#[async_trait::async_trait]
pub trait GetBookReviewsService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnReviewQuery
{
    async fn get_book_reviews(
        &self,
        dto: GetBookReviewsDto,
    ) -> error_stack::Result<Vec<ReviewDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        let reviews = self
            .review_query()
            .find_authored_by_book_id(&mut connection, &book_id)
            .await?;

        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }
}

impl<T> GetBookReviewsService for T where T: DependOnDatabaseConnection + DependOnReviewQuery {}

#[async_trait::async_trait]
pub trait GetUserReviewsService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnReviewQuery
{
    async fn get_user_reviews(
        &self,
        principal: &Principal,
    ) -> error_stack::Result<Vec<UserReviewDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let reviews = self
            .review_query()
            .find_by_user_id(&mut connection, principal.id())
            .await?;

        Ok(reviews.into_iter().map(UserReviewDto::from).collect())
    }
}

impl<T> GetUserReviewsService for T where T: DependOnDatabaseConnection + DependOnReviewQuery {}

#[async_trait::async_trait]
pub trait CreateReviewService:
    'static
    + Sync
    + Send
    + DependOnBookQuery
    + DependOnReviewQuery
    + DependOnReviewModifier
    + RecomputeRatingService
{
    async fn create_review(
        &self,
        principal: &Principal,
        dto: CreateReviewDto,
    ) -> error_stack::Result<ReviewDto, KernelError> {
        let rating = ReviewRating::new(dto.rating)?;
        let comment = ReviewComment::new(dto.comment)?;
        let book_id = BookId::new(dto.book_id);

        let mut connection = self.database_connection().transact().await?;

        self.book_query()
            .lock_by_id(&mut connection, &book_id)
            .await?
            .ok_or_else(|| book_not_found(&book_id))?;
        if self
            .review_query()
            .find_by_book_and_user(&mut connection, &book_id, principal.id())
            .await?
            .is_some()
        {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("you have already reviewed this book"));
        }

        let now = OffsetDateTime::now_utc();
        let id = ReviewId::new(Uuid::new_v4());
        let review = Review::new(
            id.clone(),
            book_id.clone(),
            principal.id().clone(),
            rating,
            comment,
            CreatedAt::new(now),
            UpdatedAt::new(now),
        );
        self.review_modifier().create(&mut connection, &review).await?;
        self.recompute_rating(&mut connection, &book_id).await?;
        let created = self
            .review_query()
            .find_authored_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| vanished(&id))?;
        connection.commit().await?;

        tracing::info!(
            review_id = %id.as_ref(),
            book_id = %book_id.as_ref(),
            "Created review"
        );
        Ok(ReviewDto::from(created))
    }
}

impl<T> CreateReviewService for T where
    T: DependOnBookQuery + DependOnReviewQuery + DependOnReviewModifier + RecomputeRatingService
{
}

#[async_trait::async_trait]
pub trait UpdateReviewService:
    'static
    + Sync
    + Send
    + DependOnBookQuery
    + DependOnReviewQuery
    + DependOnReviewModifier
    + RecomputeRatingService
{
    /// Only the author may update. Fields left as `None` keep their value.
    async fn update_review(
        &self,
        principal: &Principal,
        dto: UpdateReviewDto,
    ) -> error_stack::Result<ReviewDto, KernelError> {
        if dto.rating.is_none() && dto.comment.is_none() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("rating or comment is required"));
        }
        let rating = dto.rating.map(ReviewRating::new).transpose()?;
        let comment = dto.comment.map(ReviewComment::new).transpose()?;
        let id = ReviewId::new(dto.id);

        let mut connection = self.database_connection().transact().await?;

        let review = self.review_query().find_by_id(&mut connection, &id).await?;
        let mut review = require_author(principal, &id, review)?;
        self.book_query()
            .lock_by_id(&mut connection, review.book_id())
            .await?
            .ok_or_else(|| book_not_found(review.book_id()))?;

        review.substitute(|review| {
            if let Some(rating) = rating {
                *review.rating = rating;
            }
            if let Some(comment) = comment {
                *review.comment = comment;
            }
            *review.updated_at = UpdatedAt::now();
        });
        self.review_modifier().update(&mut connection, &review).await?;
        self.recompute_rating(&mut connection, review.book_id())
            .await?;
        let updated = self
            .review_query()
            .find_authored_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| vanished(&id))?;
        connection.commit().await?;

        tracing::info!(review_id = %id.as_ref(), "Updated review");
        Ok(ReviewDto::from(updated))
    }
}

impl<T> UpdateReviewService for T where
    T: DependOnBookQuery + DependOnReviewQuery + DependOnReviewModifier + RecomputeRatingService
{
}

#[async_trait::async_trait]
pub trait DeleteReviewService:
    'static
    + Sync
    + Send
    + DependOnBookQuery
    + DependOnReviewQuery
    + DependOnReviewModifier
    + RecomputeRatingService
{
    /// Only the author may delete.
    async fn delete_review(
        &self,
        principal: &Principal,
        dto: DeleteReviewDto,
    ) -> error_stack::Result<(), KernelError> {
        let id = ReviewId::new(dto.id);

        let mut connection = self.database_connection().transact().await?;

        let review = self.review_query().find_by_id(&mut connection, &id).await?;
        let review = require_author(principal, &id, review)?;
        self.book_query()
            .lock_by_id(&mut connection, review.book_id())
            .await?
            .ok_or_else(|| book_not_found(review.book_id()))?;

        self.review_modifier().delete(&mut connection, &id).await?;
        let rating = self
            .recompute_rating(&mut connection, review.book_id())
            .await?;
        connection.commit().await?;

        tracing::info!(
            review_id = %id.as_ref(),
            book_id = %review.book_id().as_ref(),
            remaining = rating.count().as_ref(),
            "Deleted review"
        );
        Ok(())
    }
}

impl<T> DeleteReviewService for T where
    T: DependOnBookQuery + DependOnReviewQuery + DependOnReviewModifier + RecomputeRatingService
{
}
