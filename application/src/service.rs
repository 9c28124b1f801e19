mod authorize;
mod book;
mod rating;
mod review;
mod user;

pub use self::{book::*, rating::*, review::*, user::*};
