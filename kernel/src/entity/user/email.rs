use error_stack::Report;
use serde::Serialize;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Lower-cased login address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn new(email: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let email = email.into().trim().to_lowercase();
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !domain.contains('@')
                    && !email.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if !valid || email.len() > 254 {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("email must be a valid address"));
        }
        Ok(Self(email))
    }
}

#[cfg(test)]
mod test {
    use super::UserEmail;

    #[test]
    fn normalizes_case_and_whitespace() {
        let email = UserEmail::new("  Reader@Example.COM ").unwrap();
        assert_eq!(email.as_ref(), "reader@example.com");
    }

    #[test]
    fn rejects_malformed() {
        for email in ["", "reader", "@example.com", "reader@example", "a b@example.com"] {
            assert!(UserEmail::new(email).is_err(), "{email}");
        }
    }
}
