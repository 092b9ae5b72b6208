//! Player-screen projection of a session: countdown text on a fixed tick
//! and a purely cosmetic pulse animation.

use std::time::{Duration, Instant};

use super::controller::{Countdown, RemainingTime};
use super::scheduler::{Scheduler, TimerHandle};

const INNER_HALF_PERIOD: Duration = Duration::from_millis(1000);
const OUTER_HALF_PERIOD: Duration = Duration::from_millis(1500);
const INNER_RANGE: (f64, f64) = (0.9, 1.1);
const OUTER_RANGE: (f64, f64) = (0.8, 1.2);

/// Scale factors for the two circles at one instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PulseFrame {
    pub inner: f64,
    pub outer: f64,
}

impl PulseFrame {
    pub const RESTING: Self = Self {
        inner: INNER_RANGE.0,
        outer: OUTER_RANGE.0,
    };
}

/// Endless ease-in-out breathing, anchored at screen entry.
#[derive(Copy, Clone, Debug)]
pub struct Pulse {
    started_at: Instant,
}

impl Pulse {
    pub fn start(now: Instant) -> Self {
        Self { started_at: now }
    }

    pub fn frame(&self, now: Instant) -> PulseFrame {
        let elapsed = now.saturating_duration_since(self.started_at);
        PulseFrame {
            inner: oscillate(elapsed, INNER_HALF_PERIOD, INNER_RANGE),
            outer: oscillate(elapsed, OUTER_HALF_PERIOD, OUTER_RANGE),
        }
    }
}

/// Goes `lo -> hi` over `half_period`, then back, forever.
fn oscillate(elapsed: Duration, half_period: Duration, (lo, hi): (f64, f64)) -> f64 {
    let half = half_period.as_secs_f64();
    let pos = elapsed.as_secs_f64() % (2.0 * half);
    let t = if pos <= half { pos / half } else { 2.0 - pos / half };
    let eased = t * t * (3.0 - 2.0 * t);
    (lo * (1.0 - eased) + hi * eased).clamp(lo, hi)
}

/// Countdown text for the player screen.
///
/// Ticks are anchored at the session start and each one samples the
/// countdown at its own slot (`started_at + k * interval`) rather than at
/// the moment it was polled, so whole-second displays never lag by one.
pub struct SessionPresenter<S: Scheduler> {
    scheduler: S,
    interval: Duration,
    ticker: Option<TimerHandle>,
    anchor: Option<Instant>,
    pulse: Option<Pulse>,
    remaining: RemainingTime,
}

impl<S: Scheduler> SessionPresenter<S> {
    pub fn new(scheduler: S, interval: Duration) -> Self {
        Self {
            scheduler,
            interval,
            ticker: None,
            anchor: None,
            pulse: None,
            remaining: RemainingTime::ZERO,
        }
    }

    /// Screen entry: arm the ticker, start the pulse and take a first sample
    /// so the countdown is never blank. With no running session the ticker
    /// is anchored at `now`.
    pub fn enter(&mut self, now: Instant, countdown: &impl Countdown) {
        if let Some(old) = self.ticker.take() {
            self.scheduler.cancel(old);
        }
        let anchor = countdown.started_at().filter(|&t| t <= now).unwrap_or(now);
        self.ticker = Some(self.scheduler.schedule_periodic(anchor, self.interval));
        self.anchor = Some(anchor);
        self.pulse = Some(Pulse::start(now));
        self.remaining = countdown.remaining_time(self.slot_at(now));
    }

    /// Resample when the ticker fired. Returns whether the text may have
    /// changed.
    pub fn tick(&mut self, now: Instant, countdown: &impl Countdown) -> bool {
        let Some(ticker) = self.ticker else {
            return false;
        };
        let fired = self.scheduler.poll(now).contains(&ticker);
        if fired {
            self.remaining = countdown.remaining_time(self.slot_at(now));
        }
        fired
    }

    /// Latest tick slot at or before `now`.
    fn slot_at(&self, now: Instant) -> Instant {
        let Some(anchor) = self.anchor else {
            return now;
        };
        let step = self.interval.as_nanos().max(1);
        let behind = now.saturating_duration_since(anchor).as_nanos();
        let offset = (behind / step) * step;
        anchor + Duration::from_nanos(u64::try_from(offset).unwrap_or(u64::MAX))
    }

    /// Screen teardown.
    pub fn leave(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            self.scheduler.cancel(ticker);
        }
        self.anchor = None;
        self.pulse = None;
    }

    pub fn is_active(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn remaining(&self) -> RemainingTime {
        self.remaining
    }

    /// `"<minutes> min <seconds> sec"`
    pub fn time_left_text(&self) -> String {
        self.remaining.to_string()
    }

    pub fn pulse_frame(&self, now: Instant) -> PulseFrame {
        self.pulse
            .map(|p| p.frame(now))
            .unwrap_or(PulseFrame::RESTING)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
