use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{DependOnReviewQuery, ReviewQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{BookId, BookRating, Review};
use kernel::KernelError;

/// Keeps a book's stored rating equal to the summary of its live reviews.
///
/// The rating is always rebuilt from the full review set instead of being
/// adjusted incrementally, so a missed or repeated update can never leave it
/// drifting. It must run on the same transaction as the review change that
/// triggered it; a failure here aborts that change as well.
#[async_trait::async_trait]
pub trait RecomputeRatingService:
    'static + Sync + Send + DependOnReviewQuery + DependOnBookModifier
{
    async fn recompute_rating(
        &self,
        con: &mut <Self::DatabaseConnection as DatabaseConnection>::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<BookRating, KernelError> {
        let reviews = self.review_query().find_by_book_id(con, book_id).await?;
        let rating = BookRating::compute(reviews.iter().map(Review::rating));
        self.book_modifier()
            .update_rating(con, book_id, &rating)
            .await?;
        tracing::debug!(
            book_id = %book_id.as_ref(),
            average = rating.average().as_ref(),
            count = rating.count().as_ref(),
            "Recomputed book rating"
        );
        Ok(rating)
    }
}

impl<T> RecomputeRatingService for T where T: DependOnReviewQuery + DependOnBookModifier {}
