use crate::config;

/// Load and validate settings. Config is optional: any failure falls back to
/// defaults, and the reason is handed back so it can be reported once
/// logging is up.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                let warning = format!("invalid config, using defaults: {msg}");
                eprintln!("stillpoint: {warning}");
                (config::Settings::default(), Some(warning))
            } else {
                (s, None)
            }
        }
        Err(e) => {
            let warning = format!("failed to load config, using defaults: {e}");
            eprintln!("stillpoint: {warning}");
            (config::Settings::default(), Some(warning))
        }
    }
}
