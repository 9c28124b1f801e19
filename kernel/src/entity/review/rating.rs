use error_stack::Report;
use serde::Serialize;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Fromln, AsRefln)]
pub struct ReviewRating(i32);

impl ReviewRating {
    pub fn new(rating: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        let rating = rating.into();
        if !(1..=5).contains(&rating) {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("rating must be an integer between 1 and 5"));
        }
        Ok(Self(rating))
    }
}

#[cfg(test)]
mod test {
    use super::ReviewRating;
    use crate::KernelError;

    #[test]
    fn only_one_to_five() {
        for rating in 1..=5 {
            assert!(ReviewRating::new(rating).is_ok());
        }
        for rating in [-1, 0, 6] {
            let error = ReviewRating::new(rating).unwrap_err();
            assert_eq!(error.current_context(), &KernelError::Validation);
        }
    }
}
