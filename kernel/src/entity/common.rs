mod operation;
mod text;
mod time;

pub(crate) use self::text::*;
pub use self::{operation::*, time::*};
