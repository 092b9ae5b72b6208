use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads the optional config file, then lets environment
/// variables (prefix `STILLPOINT__`) override it, and falls back to struct
/// defaults for anything left unset.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("STILLPOINT")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("session.durations")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let s = &self.session;
        if s.durations.is_empty() {
            return Err("session.durations must not be empty".to_string());
        }
        if s.durations.contains(&0) {
            return Err("session.durations must all be >= 1".to_string());
        }
        if !s.durations.contains(&s.default_duration) {
            return Err(format!(
                "session.default_duration ({}) must be one of session.durations",
                s.default_duration
            ));
        }
        if s.tick_ms == 0 {
            return Err("session.tick_ms must be >= 1".to_string());
        }
        if !(0.0..=2.0).contains(&self.audio.volume) {
            return Err("audio.volume must be within 0.0..=2.0".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `STILLPOINT_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("STILLPOINT_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/stillpoint/config.toml`
/// or `~/.config/stillpoint/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("stillpoint").join("config.toml"))
}
