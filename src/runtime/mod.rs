use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use rodio::OutputStreamBuilder;
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioBackend;
use crate::library::Catalog;

mod event_loop;
mod logging;
mod player;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (mut settings, config_warning) = settings::load_settings();

    // Optional positional argument overrides the assets directory.
    if let Some(dir) = env::args().nth(1) {
        settings.audio.assets_dir = PathBuf::from(dir);
    }

    if let Err(e) = logging::init_logging(&settings.log) {
        eprintln!("stillpoint: logging disabled: {e}");
    }
    if let Some(w) = config_warning {
        warn!("{w}");
    }
    info!(assets_dir = %settings.audio.assets_dir.display(), "starting");

    let mut stream = OutputStreamBuilder::open_default_stream()?;
    // rodio logs to stderr when the stream is dropped, which would land on
    // top of the restored terminal.
    stream.log_on_drop(false);

    let backend = RodioBackend::new(
        stream,
        settings.audio.assets_dir.clone(),
        settings.audio.extension.clone(),
        settings.audio.volume,
    );
    let mut app = App::new(
        Catalog::builtin(),
        settings.session.durations.clone(),
        settings.session.default_duration,
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &backend);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("bye");
    run_result
}
