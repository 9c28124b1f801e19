use error_stack::Report;
use serde::Serialize;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const MAX_ISBN_LEN: usize = 32;

/// Catalogue identifier, stored in canonical form: hyphens and whitespace
/// removed, letters upper-cased. Uniqueness is decided on that form, so
/// `978-3-16-148410-0` and `9783161484100` are the same ISBN.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Fromln, AsRefln)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(value: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let canonical = value
            .into()
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect::<String>();
        if canonical.is_empty() {
            return Err(Report::new(KernelError::Validation).attach_printable("isbn is empty"));
        }
        if canonical.chars().count() > MAX_ISBN_LEN {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("isbn must be at most {MAX_ISBN_LEN} characters")));
        }
        Ok(Self(canonical))
    }
}

#[cfg(test)]
mod test {
    use super::Isbn;

    #[test]
    fn separators_do_not_change_identity() {
        let hyphenated = Isbn::new("978-3-16-148410-0").unwrap();
        let bare = Isbn::new(" 9783161484100 ").unwrap();
        assert_eq!(hyphenated, bare);
        assert_eq!(hyphenated.as_ref(), "9783161484100");
        assert_eq!(Isbn::new("0-306-40615-x").unwrap().as_ref(), "030640615X");
    }

    #[test]
    fn accepts_free_form_identifiers() {
        assert_eq!(Isbn::new("B00TEST123").unwrap().as_ref(), "B00TEST123");
        assert_eq!(Isbn::new("12345").unwrap().as_ref(), "12345");
    }

    #[test]
    fn rejects_blank_or_oversized() {
        assert!(Isbn::new(" - ").is_err());
        assert!(Isbn::new("9".repeat(33)).is_err());
    }
}
