use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/stillpoint/config.toml` or `~/.config/stillpoint/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `STILLPOINT__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub session: SessionSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Directory holding `<asset_id>.<extension>` files.
    pub assets_dir: PathBuf,
    /// Extension of the asset files, without the dot.
    pub extension: String,
    /// Playback volume; 1.0 is unchanged.
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            extension: "mp3".to_string(),
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Options offered by the duration picker, in minutes.
    pub durations: Vec<u32>,
    /// Picker selection when the screen opens. Must be one of `durations`.
    pub default_duration: u32,
    /// Countdown refresh interval (milliseconds).
    pub tick_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            durations: vec![15, 30, 45, 60],
            default_duration: 15,
            tick_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Greeting shown above the track list.
    pub header_text: String,
    /// Animate the circles on the player screen.
    pub pulse: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: "For a better YOU!".to_string(),
            pulse: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive, overridden by `STILLPOINT_LOG`.
    pub filter: String,
    /// Log file. The terminal belongs to the UI, so without a file nothing
    /// is logged.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}
