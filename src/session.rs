//! Timed meditation sessions.
//!
//! `SessionController` owns the lifecycle of one looping playback run and
//! its auto-stop timer. `SessionPresenter` turns controller state into the
//! countdown text and pulse animation the player screen draws. Both are
//! driven by a pull-model `Scheduler` polled from the event loop.

mod clock;
mod controller;
mod error;
mod presenter;
mod scheduler;

pub use clock::{Clock, SystemClock};
pub use controller::*;
pub use error::SessionError;
pub use presenter::*;
pub use scheduler::{Scheduler, TimerHandle, TimerQueue};

#[cfg(test)]
pub(crate) mod testing;
