use std::fmt;

use crate::audio::AssetUnavailable;

/// Why `SessionController::start` refused to start a session.
#[derive(Debug)]
pub enum SessionError {
    /// The resolved asset could not be loaded. Not retried.
    AssetUnavailable(AssetUnavailable),
    /// A session needs at least one minute.
    InvalidDuration(u32),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::AssetUnavailable(e) => write!(f, "audio unavailable: {e}"),
            SessionError::InvalidDuration(m) => {
                write!(f, "invalid session duration: {m} minutes (must be > 0)")
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::AssetUnavailable(e) => Some(e),
            SessionError::InvalidDuration(_) => None,
        }
    }
}

impl From<AssetUnavailable> for SessionError {
    fn from(e: AssetUnavailable) -> Self {
        SessionError::AssetUnavailable(e)
    }
}
