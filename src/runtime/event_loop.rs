use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, Screen};
use crate::audio::{AudioBackend, RodioBackend};
use crate::config;
use crate::session::{Clock, SystemClock};
use crate::ui;

use super::player::PlayerScreen;

/// Navigation requests raised outside the key handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// A session ended; leave the player screen.
    Dismiss,
}

/// What a key press means on the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Choose,
    ShorterDuration,
    LongerDuration,
    Play,
    Back,
    Stop,
    Quit,
}

/// Map a key press to an action for `screen`. The player screen only knows
/// stop and quit.
pub fn key_action(screen: &Screen, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match screen {
        Screen::Home => match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
            KeyCode::Enter => Some(Action::Choose),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        Screen::Meditate { .. } => match key.code {
            KeyCode::Char('h') | KeyCode::Left => Some(Action::ShorterDuration),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::LongerDuration),
            KeyCode::Enter => Some(Action::Play),
            KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        Screen::Player { .. } => match key.code {
            KeyCode::Char('s') | KeyCode::Enter | KeyCode::Esc => Some(Action::Stop),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
    }
}

fn apply<A: AudioBackend, C: Clock>(
    action: Action,
    app: &mut App,
    player: Option<&mut PlayerScreen<A, C>>,
) {
    match action {
        Action::Up => app.prev(),
        Action::Down => app.next(),
        Action::Choose => {
            app.open_picker();
        }
        Action::ShorterDuration => app.prev_duration(),
        Action::LongerDuration => app.next_duration(),
        Action::Play => {
            app.open_player();
        }
        Action::Back => {
            app.back();
        }
        Action::Stop => {
            // A stopped session dismisses itself through `NavEvent`.
            let stopped = player.is_some_and(|p| p.stop());
            if !stopped {
                app.dismiss();
            }
        }
        Action::Quit => app.quit(),
    }
}

/// Keep `player` in step with the navigation stack: open it when the player
/// screen is on top, drop it (tearing the session down) otherwise.
fn sync_player<A: AudioBackend + Clone, C: Clock + Clone>(
    app: &App,
    player: &mut Option<PlayerScreen<A, C>>,
    backend: &A,
    clock: &C,
    settings: &config::Settings,
    nav_tx: &mpsc::Sender<NavEvent>,
) {
    match (app.screen(), player.is_some()) {
        (Screen::Player { title, minutes }, false) => {
            debug!(title = %title, minutes, "opening player screen");
            *player = Some(PlayerScreen::open(
                title,
                *minutes,
                app.catalog.clone(),
                backend.clone(),
                clock.clone(),
                settings,
                nav_tx.clone(),
            ));
        }
        (Screen::Player { .. }, true) => {}
        (_, true) => {
            debug!("closing player screen");
            *player = None;
        }
        (_, false) => {}
    }
}

/// Everything one loop iteration does besides drawing and input: open or
/// close the player, run its timers, and apply the dismissals they raised.
/// Returns how many dismissals were applied.
struct Pump<'a, A, C> {
    backend: &'a A,
    clock: &'a C,
    settings: &'a config::Settings,
    nav_tx: mpsc::Sender<NavEvent>,
    nav_rx: mpsc::Receiver<NavEvent>,
}

impl<'a, A: AudioBackend + Clone, C: Clock + Clone> Pump<'a, A, C> {
    fn new(backend: &'a A, clock: &'a C, settings: &'a config::Settings) -> Self {
        let (nav_tx, nav_rx) = mpsc::channel();
        Self {
            backend,
            clock,
            settings,
            nav_tx,
            nav_rx,
        }
    }

    fn step(&self, app: &mut App, player: &mut Option<PlayerScreen<A, C>>) -> usize {
        self.sync(app, player);

        if let Some(p) = player.as_mut() {
            p.update();
        }

        let mut dismissed = 0;
        while let Ok(nav) = self.nav_rx.try_recv() {
            match nav {
                NavEvent::Dismiss => {
                    app.dismiss();
                    dismissed += 1;
                }
            }
        }
        self.sync(app, player);
        dismissed
    }

    fn sync(&self, app: &App, player: &mut Option<PlayerScreen<A, C>>) {
        sync_player(app, player, self.backend, self.clock, self.settings, &self.nav_tx);
    }
}

/// Main terminal event loop: handles input, drives session timers and draws.
/// Returns `Ok(())` when the user quits; any running session is torn down
/// on the way out.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    backend: &RodioBackend,
) -> Result<(), Box<dyn std::error::Error>> {
    let pump = Pump::new(backend, &SystemClock, settings);
    let mut player: Option<PlayerScreen<RodioBackend, SystemClock>> = None;

    loop {
        pump.step(app, &mut player);

        if app.should_quit {
            return Ok(());
        }

        let view = player.as_ref().map(|p| p.view());
        terminal.draw(|f| ui::draw(f, app, view.as_ref(), &settings.ui))?;
        drop(view);

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = key_action(app.screen(), key) {
                    apply(action, app, player.as_mut());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Catalog;
    use crate::session::testing::{FakeBackend, ManualClock};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn player() -> Screen {
        Screen::Player {
            title: "Deep Sleep of Mind".into(),
            minutes: 15,
        }
    }

    #[test]
    fn home_keys_move_and_choose() {
        assert_eq!(key_action(&Screen::Home, key(KeyCode::Char('j'))), Some(Action::Down));
        assert_eq!(key_action(&Screen::Home, key(KeyCode::Up)), Some(Action::Up));
        assert_eq!(key_action(&Screen::Home, key(KeyCode::Enter)), Some(Action::Choose));
        assert_eq!(key_action(&Screen::Home, key(KeyCode::Esc)), None);
    }

    #[test]
    fn picker_keys_change_duration_and_go_back() {
        let screen = Screen::Meditate {
            title: "Deep Sleep of Mind".into(),
        };
        assert_eq!(key_action(&screen, key(KeyCode::Char('l'))), Some(Action::LongerDuration));
        assert_eq!(key_action(&screen, key(KeyCode::Left)), Some(Action::ShorterDuration));
        assert_eq!(key_action(&screen, key(KeyCode::Enter)), Some(Action::Play));
        assert_eq!(key_action(&screen, key(KeyCode::Esc)), Some(Action::Back));
    }

    #[test]
    fn player_only_stops_or_quits() {
        assert_eq!(key_action(&player(), key(KeyCode::Char('s'))), Some(Action::Stop));
        assert_eq!(key_action(&player(), key(KeyCode::Esc)), Some(Action::Stop));
        assert_eq!(key_action(&player(), key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(key_action(&player(), key(KeyCode::Backspace)), None);
        assert_eq!(key_action(&player(), key(KeyCode::Char('j'))), None);
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_action(&Screen::Home, ctrl_c), Some(Action::Quit));
        assert_eq!(key_action(&player(), ctrl_c), Some(Action::Quit));
    }

    #[test]
    fn stop_without_a_session_leaves_the_player_directly() {
        let mut app = App::new(Catalog::builtin(), vec![15, 30], 15);
        app.open_picker();
        app.open_player();
        apply::<FakeBackend, ManualClock>(Action::Stop, &mut app, None);
        assert!(matches!(app.screen(), Screen::Meditate { .. }));
    }

    fn at_player(minutes: u32) -> App {
        let mut app = App::new(Catalog::builtin(), vec![15, 30, 45, 60], 15);
        app.open_picker();
        while app.selected_duration() != Some(minutes) {
            app.next_duration();
        }
        app.open_player();
        app
    }

    #[test]
    fn auto_stop_returns_to_the_picker_once() {
        let audio = FakeBackend::default();
        let clock = ManualClock::new();
        let settings = config::Settings::default();
        let pump = Pump::new(&audio, &clock, &settings);
        let mut app = at_player(15);
        let mut player = None;

        assert_eq!(pump.step(&mut app, &mut player), 0);
        assert!(player.as_ref().is_some_and(|p| p.is_playing()));
        assert_eq!(app.depth(), 3);

        clock.advance(Duration::from_secs(900));
        assert_eq!(pump.step(&mut app, &mut player), 1);
        assert!(matches!(app.screen(), Screen::Meditate { .. }));
        assert_eq!(app.depth(), 2);
        assert!(player.is_none());
        assert_eq!(audio.0.borrow().stopped.len(), 1);

        clock.advance(Duration::from_secs(900));
        assert_eq!(pump.step(&mut app, &mut player), 0);
        assert_eq!(app.depth(), 2);
    }

    #[test]
    fn manual_stop_pops_once_with_no_late_dismissal() {
        let audio = FakeBackend::default();
        let clock = ManualClock::new();
        let settings = config::Settings::default();
        let pump = Pump::new(&audio, &clock, &settings);
        let mut app = at_player(60);
        let mut player = None;
        pump.step(&mut app, &mut player);

        clock.advance(Duration::from_secs(10));
        apply(Action::Stop, &mut app, player.as_mut());
        // The stop is reported through the channel, not popped in place.
        assert_eq!(app.depth(), 3);

        assert_eq!(pump.step(&mut app, &mut player), 1);
        assert!(matches!(app.screen(), Screen::Meditate { .. }));
        assert!(player.is_none());

        clock.advance(Duration::from_secs(3600));
        assert_eq!(pump.step(&mut app, &mut player), 0);
        assert_eq!(app.depth(), 2);
        assert_eq!(audio.0.borrow().stopped.len(), 1);
    }

    #[test]
    fn player_opened_by_the_loop_starts_at_full_duration() {
        let audio = FakeBackend::default();
        let settings = config::Settings::default();
        let pump = Pump::new(&audio, &SystemClock, &settings);
        let mut app = at_player(15);
        let mut player = None;

        pump.step(&mut app, &mut player);
        let view = player.as_ref().map(|p| p.view());
        assert_eq!(view.map(|v| v.time_left).as_deref(), Some("15 min 0 sec"));
    }
}
