use destructure::Destructure;
use serde::Serialize;
use vodca::{AsRefln, Fromln, References};

use crate::entity::ReviewRating;

/// Mean rating rounded to one decimal place, `0.0` when there are no reviews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Fromln, AsRefln)]
pub struct AverageRating(f64);

impl AverageRating {
    pub fn new(value: impl Into<f64>) -> Self {
        Self(value.into())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Fromln, AsRefln)]
pub struct ReviewCount(i64);

impl ReviewCount {
    pub fn new(value: impl Into<i64>) -> Self {
        Self(value.into())
    }
}

/// Denormalized summary of a book's reviews.
#[derive(Debug, Clone, PartialEq, References, Destructure)]
pub struct BookRating {
    average: AverageRating,
    count: ReviewCount,
}

impl BookRating {
    pub fn new(average: AverageRating, count: ReviewCount) -> Self {
        Self { average, count }
    }

    pub fn empty() -> Self {
        Self::new(AverageRating::new(0.0), ReviewCount::new(0))
    }

    /// Recomputes the summary from the complete set of ratings of a book.
    ///
    /// Rounding is half-up to tenths and done on integers, so the result does
    /// not depend on the order of `ratings`.
    pub fn compute<'a>(ratings: impl IntoIterator<Item = &'a ReviewRating>) -> Self {
        let (sum, count) = ratings
            .into_iter()
            .fold((0_i64, 0_i64), |(sum, count), rating| {
                (sum + i64::from(*rating.as_ref()), count + 1)
            });
        if count == 0 {
            return Self::empty();
        }
        let tenths = (sum * 20 + count) / (count * 2);
        Self::new(
            AverageRating::new(tenths as f64 / 10.0),
            ReviewCount::new(count),
        )
    }
}

impl Default for BookRating {
    fn default() -> Self {
        Self::empty()
    }
}
