use serde::Serialize;
use vodca::{AsRefln, Fromln};

use crate::entity::common::bounded_text;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Fromln, AsRefln)]
pub struct BookAuthor(String);

impl BookAuthor {
    pub fn new(value: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text("author", value, 1, 100).map(Self)
    }
}
