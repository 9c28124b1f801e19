use serde::Serialize;
use vodca::{AsRefln, Fromln};

use crate::entity::common::bounded_text;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Fromln, AsRefln)]
pub struct CoverImage(String);

impl CoverImage {
    pub fn new(value: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text("cover image", value, 1, 2048).map(Self)
    }
}
