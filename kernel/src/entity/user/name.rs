use serde::Serialize;
use vodca::{AsRefln, Fromln};

use crate::entity::common::bounded_text;
use crate::KernelError;

/// Display name shown next to a user's reviews.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text("name", name, 1, 50).map(Self)
    }
}
