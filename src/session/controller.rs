//! Session lifecycle: start, countdown, auto-stop and manual stop.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::audio::{AudioBackend, Looping};
use crate::library::{Catalog, Track};

use super::clock::Clock;
use super::error::SessionError;
use super::scheduler::{Scheduler, TimerHandle};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Playing,
}

/// The running session, as seen from outside the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub track: Track,
    pub duration: Duration,
    pub started_at: Instant,
}

impl Session {
    pub fn remaining(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.started_at);
        self.duration.saturating_sub(elapsed)
    }
}

/// Whole minutes and leftover seconds still to go. Sub-second remainders are
/// truncated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RemainingTime {
    pub minutes: u64,
    pub seconds: u64,
}

impl RemainingTime {
    pub const ZERO: Self = Self {
        minutes: 0,
        seconds: 0,
    };

    pub fn from_duration(d: Duration) -> Self {
        let secs = d.as_secs();
        Self {
            minutes: secs / 60,
            seconds: secs % 60,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min {} sec", self.minutes, self.seconds)
    }
}

/// Anything that can report how much of a session is left.
pub trait Countdown {
    fn remaining_time(&self, now: Instant) -> RemainingTime;

    /// When the running countdown began, if one is running.
    fn started_at(&self) -> Option<Instant>;
}

struct ActiveSession<H> {
    session: Session,
    audio: H,
    auto_stop: TimerHandle,
}

/// Owns at most one session, its audio handle and its auto-stop timer.
///
/// Lives for one presentation of the player screen. `on_dismiss` is called
/// each time a playing session ends, whether by `stop()` or by the auto-stop
/// firing inside `poll()`. Dropping the controller releases everything
/// without calling `on_dismiss`.
pub struct SessionController<A: AudioBackend, S: Scheduler, C: Clock> {
    catalog: Catalog,
    audio: A,
    scheduler: S,
    clock: C,
    active: Option<ActiveSession<A::Handle>>,
    on_dismiss: Box<dyn FnMut()>,
}

impl<A: AudioBackend, S: Scheduler, C: Clock> SessionController<A, S, C> {
    pub fn new(
        catalog: Catalog,
        audio: A,
        scheduler: S,
        clock: C,
        on_dismiss: impl FnMut() + 'static,
    ) -> Self {
        Self {
            catalog,
            audio,
            scheduler,
            clock,
            active: None,
            on_dismiss: Box::new(on_dismiss),
        }
    }

    /// Start a looping session for `title` lasting `duration_minutes`.
    ///
    /// Unknown titles fall back to the first catalog entry. On error the
    /// controller stays idle with nothing held and nothing scheduled.
    pub fn start(&mut self, title: &str, duration_minutes: u32) -> Result<(), SessionError> {
        if duration_minutes == 0 {
            warn!(title, "refusing to start a zero-length session");
            return Err(SessionError::InvalidDuration(duration_minutes));
        }

        // One session per controller: a restart replaces the old run quietly.
        if let Some(previous) = self.active.take() {
            debug!(track = %previous.session.track.title, "replacing running session");
            self.release(previous);
        }

        let track = self.catalog.resolve(title).clone();
        if track.title != title {
            debug!(requested = title, fallback = %track.title, "unknown track title");
        }

        let mut handle = match self.audio.load(&track.asset_id) {
            Ok(h) => h,
            Err(e) => {
                warn!(asset = %track.asset_id, error = %e, "cannot start session");
                return Err(e.into());
            }
        };
        self.audio.play(&mut handle, Looping::Forever);

        let started_at = self.clock.now();
        let duration = Duration::from_secs(u64::from(duration_minutes) * 60);
        let auto_stop = self.scheduler.schedule_once(started_at, duration);

        info!(track = %track.title, asset = %track.asset_id, minutes = duration_minutes, "session started");
        self.active = Some(ActiveSession {
            session: Session {
                track,
                duration,
                started_at,
            },
            audio: handle,
            auto_stop,
        });
        Ok(())
    }

    /// End the running session and signal dismissal. No-op when idle.
    pub fn stop(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        info!(track = %active.session.track.title, "session stopped");
        self.release(active);
        (self.on_dismiss)();
    }

    /// Run scheduled work that came due. Returns `true` when this poll
    /// ended the session.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut ended = false;
        for fired in self.scheduler.poll(now) {
            let is_auto_stop = self
                .active
                .as_ref()
                .is_some_and(|a| a.auto_stop == fired);
            if is_auto_stop {
                debug!("session time is up");
                self.stop();
                ended = true;
            }
        }
        ended
    }

    pub fn status(&self) -> SessionStatus {
        if self.active.is_some() {
            SessionStatus::Playing
        } else {
            SessionStatus::Idle
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status() == SessionStatus::Playing
    }

    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref().map(|a| &a.session)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// `(0, 0)` when idle or once the duration has elapsed, even if the
    /// auto-stop has not been polled yet.
    pub fn remaining_time(&self, now: Instant) -> RemainingTime {
        match self.session() {
            Some(s) => RemainingTime::from_duration(s.remaining(now)),
            None => RemainingTime::ZERO,
        }
    }

    // Cancel first so a pending auto-stop can never run after a manual stop.
    fn release(&mut self, active: ActiveSession<A::Handle>) {
        self.scheduler.cancel(active.auto_stop);
        self.audio.stop(active.audio);
    }
}

impl<A: AudioBackend, S: Scheduler, C: Clock> Countdown for SessionController<A, S, C> {
    fn remaining_time(&self, now: Instant) -> RemainingTime {
        SessionController::remaining_time(self, now)
    }

    fn started_at(&self) -> Option<Instant> {
        self.session().map(|s| s.started_at)
    }
}

impl<A: AudioBackend, S: Scheduler, C: Clock> Drop for SessionController<A, S, C> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(track = %active.session.track.title, "tearing down running session");
            self.release(active);
        }
    }
}
