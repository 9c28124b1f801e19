use serde::Serialize;
use vodca::{AsRefln, Fromln};

use crate::entity::common::bounded_text;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Fromln, AsRefln)]
pub struct Genre(String);

impl Genre {
    pub fn new(value: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text("genre", value, 1, 50).map(Self)
    }
}
