mod book;
mod common;
mod review;
mod user;

pub use self::{book::*, common::*, review::*, user::*};
