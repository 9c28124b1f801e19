use std::fmt::{Debug, Formatter};

use error_stack::Report;
use vodca::AsRefln;

use crate::KernelError;

/// Password as typed by the user. Never persisted.
#[derive(Clone, AsRefln)]
pub struct RawPassword(String);

impl RawPassword {
    pub fn new(password: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let password = password.into();
        let length = password.chars().count();
        if !(6..=128).contains(&length) {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("password must be between 6 and 128 characters"));
        }
        Ok(Self(password))
    }
}

impl Debug for RawPassword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("RawPassword(***)")
    }
}

#[derive(Clone, Eq, PartialEq, AsRefln)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }
}

impl Debug for HashedPassword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("HashedPassword(***)")
    }
}
