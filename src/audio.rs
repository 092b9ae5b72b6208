//! Audio output: the backend seam the session controller plays through and
//! its rodio implementation.

mod backend;
mod sink;
mod types;

pub use backend::AudioBackend;
pub use sink::{LoadedAsset, RodioBackend, asset_path};
pub use types::*;
