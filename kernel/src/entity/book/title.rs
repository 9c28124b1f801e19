use serde::Serialize;
use vodca::{AsRefln, Fromln};

use crate::entity::common::bounded_text;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Fromln, AsRefln)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(value: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text("title", value, 1, 200).map(Self)
    }
}
