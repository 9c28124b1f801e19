use error_stack::Report;
use serde::Serialize;
use time::OffsetDateTime;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const EARLIEST_YEAR: i32 = 1000;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Fromln, AsRefln)]
pub struct PublishedYear(i32);

impl PublishedYear {
    /// Accepts years from 1000 up to next year.
    pub fn new(year: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        let year = year.into();
        let latest = OffsetDateTime::now_utc().year() + 1;
        if !(EARLIEST_YEAR..=latest).contains(&year) {
            return Err(Report::new(KernelError::Validation).attach_printable(format!(
                "published year must be between {EARLIEST_YEAR} and {latest}"
            )));
        }
        Ok(Self(year))
    }
}

#[cfg(test)]
mod test {
    use super::PublishedYear;
    use time::OffsetDateTime;

    #[test]
    fn bounded_to_calendar_range() {
        let next_year = OffsetDateTime::now_utc().year() + 1;
        assert!(PublishedYear::new(1000).is_ok());
        assert!(PublishedYear::new(next_year).is_ok());
        assert!(PublishedYear::new(999).is_err());
        assert!(PublishedYear::new(next_year + 1).is_err());
    }
}
