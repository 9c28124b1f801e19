use serde::Serialize;
use vodca::{AsRefln, Fromln};

use crate::entity::common::bounded_text;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Fromln, AsRefln)]
pub struct ReviewComment(String);

impl ReviewComment {
    pub fn new(comment: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text("comment", comment, 5, 1000).map(Self)
    }
}
