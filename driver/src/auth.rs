mod jwt;
mod password;
mod role;

pub use self::{jwt::*, password::*, role::*};
