use serde::Serialize;
use vodca::{AsRefln, Fromln};

use crate::entity::common::bounded_text;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Fromln, AsRefln)]
pub struct BookDescription(String);

impl BookDescription {
    pub fn new(value: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text("description", value, 10, 2000).map(Self)
    }
}
