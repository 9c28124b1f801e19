use serde::Serialize;
use vodca::{AsRefln, Fromln};

/// Bearer credential handed to a client after login.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Fromln, AsRefln)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}
