use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const MAX_SELECT_LIMIT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectLimit(i64);

impl SelectLimit {
    pub fn new(value: impl Into<i64>) -> Self {
        SelectLimit(value.into())
    }

    pub fn validate(&self) -> error_stack::Result<(), KernelError> {
        if !(1..=MAX_SELECT_LIMIT).contains(&self.0) {
            return Err(Report::new(KernelError::Validation).attach_printable(format!(
                "limit must be between 1 and {MAX_SELECT_LIMIT}"
            )));
        }
        Ok(())
    }
}

impl Default for SelectLimit {
    fn default() -> Self {
        Self::new(10)
    }
}

/// 1-based page number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectPage(i64);

impl SelectPage {
    pub fn new(value: impl Into<i64>) -> Self {
        SelectPage(value.into())
    }

    pub fn validate(&self) -> error_stack::Result<(), KernelError> {
        if self.0 < 1 {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("page must be a positive number"));
        }
        Ok(())
    }

    pub fn offset(&self, limit: &SelectLimit) -> i64 {
        (self.0 - 1).saturating_mul(limit.0)
    }

    /// Number of pages needed to show `total` rows, `limit` at a time.
    pub fn count(total: i64, limit: &SelectLimit) -> i64 {
        if limit.0 <= 0 {
            return 0;
        }
        (total + limit.0 - 1) / limit.0
    }
}

impl Default for SelectPage {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod test {
    use super::{SelectLimit, SelectPage};

    #[test]
    fn offset_is_zero_on_first_page() {
        let limit = SelectLimit::new(10);
        assert_eq!(SelectPage::new(1).offset(&limit), 0);
        assert_eq!(SelectPage::new(3).offset(&limit), 20);
    }

    #[test]
    fn page_count_rounds_up() {
        let limit = SelectLimit::new(10);
        assert_eq!(SelectPage::count(0, &limit), 0);
        assert_eq!(SelectPage::count(10, &limit), 1);
        assert_eq!(SelectPage::count(11, &limit), 2);
    }

    #[test]
    fn bounds_are_checked() {
        assert!(SelectPage::new(0).validate().is_err());
        assert!(SelectLimit::new(0).validate().is_err());
        assert!(SelectLimit::new(101).validate().is_err());
        assert!(SelectLimit::default().validate().is_ok());
    }
}
