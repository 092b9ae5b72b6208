//! Track catalog: the fixed set of meditation tracks shown on the home
//! screen and the mapping from a display title to an audio asset id.

mod catalog;
mod model;

pub use catalog::*;
pub use model::*;
