pub use self::{catalog::*, piece::*};

pub(crate) mod catalog;
pub(crate) mod piece;
