//! The player screen's live state: one session controller plus its
//! presenter, created when the screen is pushed and dropped when it leaves.

use std::sync::mpsc::Sender;
use std::time::Duration;

use tracing::warn;

use crate::audio::AudioBackend;
use crate::config::Settings;
use crate::library::Catalog;
use crate::session::{Clock, PulseFrame, SessionController, SessionPresenter, TimerQueue};
use crate::ui::PlayerView;

use super::event_loop::NavEvent;

pub struct PlayerScreen<A: AudioBackend, C: Clock> {
    controller: SessionController<A, TimerQueue, C>,
    presenter: SessionPresenter<TimerQueue>,
    notice: Option<String>,
    animate: bool,
}

impl<A: AudioBackend, C: Clock> PlayerScreen<A, C> {
    /// Start the session for `title`. A failed start still opens the
    /// screen, with no playback and the reason shown as a notice.
    pub fn open(
        title: &str,
        minutes: u32,
        catalog: Catalog,
        backend: A,
        clock: C,
        settings: &Settings,
        nav_tx: Sender<NavEvent>,
    ) -> Self {
        let on_dismiss = move || {
            let _ = nav_tx.send(NavEvent::Dismiss);
        };
        let mut controller =
            SessionController::new(catalog, backend, TimerQueue::new(), clock, on_dismiss);

        let notice = match controller.start(title, minutes) {
            Ok(()) => None,
            Err(e) => {
                warn!(title, error = %e, "player opened without playback");
                Some(e.to_string())
            }
        };

        let mut presenter = SessionPresenter::new(
            TimerQueue::new(),
            Duration::from_millis(settings.session.tick_ms),
        );
        presenter.enter(controller.now(), &controller);

        Self {
            controller,
            presenter,
            notice,
            animate: settings.ui.pulse,
        }
    }

    /// Run due timers: auto-stop first, then the countdown tick.
    pub fn update(&mut self) {
        let now = self.controller.now();
        self.controller.poll(now);
        self.presenter.tick(now, &self.controller);
    }

    /// User pressed stop. Returns `false` when there was no session to stop,
    /// in which case no dismissal will arrive and the caller leaves directly.
    pub fn stop(&mut self) -> bool {
        if self.controller.is_playing() {
            self.controller.stop();
            true
        } else {
            false
        }
    }

    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    pub fn view(&self) -> PlayerView<'_> {
        let pulse = if self.animate {
            self.presenter.pulse_frame(self.controller.now())
        } else {
            PulseFrame::RESTING
        };
        PlayerView {
            time_left: self.presenter.time_left_text(),
            pulse,
            notice: self.notice.as_deref(),
        }
    }
}

impl<A: AudioBackend, C: Clock> Drop for PlayerScreen<A, C> {
    fn drop(&mut self) {
        self.presenter.leave();
    }
}
