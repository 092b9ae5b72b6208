//! Application module: exposes the navigation model used by the TUI and
//! runtime.
//!
//! The `App` model lives in `app::model` and holds the screen stack, the
//! home-list cursor and the duration picker selection.

mod model;

pub use model::*;
