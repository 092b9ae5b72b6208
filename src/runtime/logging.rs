use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Install the global `tracing` subscriber writing to `settings.file`.
///
/// The terminal is owned by the UI, so there is no stderr fallback: with no
/// file configured nothing is installed and `Ok(false)` is returned. The
/// `STILLPOINT_LOG` env var takes precedence over `settings.filter`.
pub fn init_logging(settings: &LogSettings) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
    let Some(path) = &settings.file else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env("STILLPOINT_LOG")
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()?;
    Ok(true)
}
