//! Small audio types shared between the backend trait and its callers.

use std::fmt;
use std::path::PathBuf;

/// How many times a loaded asset should be played back.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Looping {
    /// Play once and go silent.
    Once,
    /// Restart from the beginning every time the asset ends.
    Forever,
}

/// Why an asset could not be turned into something playable.
#[derive(Debug)]
pub enum UnavailableReason {
    /// No file at the resolved path.
    Missing(PathBuf),
    /// The file exists but could not be opened.
    Io(std::io::Error),
    /// The file was opened but is not decodable audio.
    Decode(String),
}

/// Failure to acquire the audio resource for an asset.
#[derive(Debug)]
pub struct AssetUnavailable {
    pub asset_id: String,
    pub reason: UnavailableReason,
}

impl AssetUnavailable {
    pub fn new(asset_id: impl Into<String>, reason: UnavailableReason) -> Self {
        Self {
            asset_id: asset_id.into(),
            reason,
        }
    }
}

impl fmt::Display for AssetUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            UnavailableReason::Missing(path) => {
                write!(f, "asset {:?} not found at {}", self.asset_id, path.display())
            }
            UnavailableReason::Io(e) => write!(f, "asset {:?} could not be opened: {e}", self.asset_id),
            UnavailableReason::Decode(msg) => {
                write!(f, "asset {:?} could not be decoded: {msg}", self.asset_id)
            }
        }
    }
}

impl std::error::Error for AssetUnavailable {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.reason {
            UnavailableReason::Io(e) => Some(e),
            _ => None,
        }
    }
}
