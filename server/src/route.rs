mod auth;
mod book;
mod health;
mod review;

pub use self::{auth::*, book::*, health::*, review::*};
