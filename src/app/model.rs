//! Application model types: `App` and `Screen`.
//!
//! Navigation is a stack, `Home -> Meditate -> Player`. The player screen
//! has no back action; it is left only through dismissal.

use crate::library::{Catalog, Track};

/// One entry of the navigation stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Track list.
    Home,
    /// Duration picker for the chosen track.
    Meditate { title: String },
    /// Countdown and playback for the chosen track and duration.
    Player { title: String, minutes: u32 },
}

static HOME: Screen = Screen::Home;

/// The main application model.
pub struct App {
    pub catalog: Catalog,
    pub selected: usize,
    pub should_quit: bool,

    stack: Vec<Screen>,
    durations: Vec<u32>,
    default_duration: usize,
    duration_index: usize,
}

impl App {
    /// Create a new `App` on the home screen. `durations` are the picker
    /// options; `default_duration` is preselected when present.
    pub fn new(catalog: Catalog, durations: Vec<u32>, default_duration: u32) -> Self {
        let default_idx = durations
            .iter()
            .position(|&d| d == default_duration)
            .unwrap_or(0);

        Self {
            catalog,
            selected: 0,
            should_quit: false,
            stack: vec![Screen::Home],
            durations,
            default_duration: default_idx,
            duration_index: default_idx,
        }
    }

    pub fn screen(&self) -> &Screen {
        // The stack is never emptied below `Home`.
        self.stack.last().unwrap_or(&HOME)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Move the home cursor down, stopping at the last track.
    pub fn next(&mut self) {
        if self.selected + 1 < self.catalog.len() {
            self.selected += 1;
        }
    }

    /// Move the home cursor up, stopping at the first track.
    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.catalog.get(self.selected)
    }

    pub fn durations(&self) -> &[u32] {
        &self.durations
    }

    pub fn duration_index(&self) -> usize {
        self.duration_index
    }

    pub fn selected_duration(&self) -> Option<u32> {
        self.durations.get(self.duration_index).copied()
    }

    pub fn next_duration(&mut self) {
        if self.duration_index + 1 < self.durations.len() {
            self.duration_index += 1;
        }
    }

    pub fn prev_duration(&mut self) {
        self.duration_index = self.duration_index.saturating_sub(1);
    }

    /// Home -> Meditate for the highlighted track. The picker always opens
    /// on the default duration.
    pub fn open_picker(&mut self) -> bool {
        if !matches!(self.screen(), Screen::Home) {
            return false;
        }
        let Some(track) = self.selected_track() else {
            return false;
        };
        let title = track.title.clone();
        self.duration_index = self.default_duration;
        self.stack.push(Screen::Meditate { title });
        true
    }

    /// Meditate -> Player with the picked duration.
    pub fn open_player(&mut self) -> bool {
        let Screen::Meditate { title } = self.screen() else {
            return false;
        };
        let Some(minutes) = self.selected_duration() else {
            return false;
        };
        let title = title.clone();
        self.stack.push(Screen::Player { title, minutes });
        true
    }

    /// User back navigation. Only the picker can go back; home is the root
    /// and the player must be stopped instead.
    pub fn back(&mut self) -> bool {
        if matches!(self.screen(), Screen::Meditate { .. }) {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Leave the player screen after its session ended.
    pub fn dismiss(&mut self) -> bool {
        if matches!(self.screen(), Screen::Player { .. }) {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
