//! Pull-model timers.
//!
//! Nothing here runs on its own: the owner calls `poll(now)` from its loop
//! and gets back the handles that came due. Cancelled handles are never
//! returned again, which is what lets a manual stop beat a pending auto-stop.

use std::time::{Duration, Instant};

/// Owned reference to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

pub trait Scheduler {
    /// Fire once, `delay` after `now`.
    fn schedule_once(&mut self, now: Instant, delay: Duration) -> TimerHandle;

    /// Fire every `interval`, first at `now + interval`.
    fn schedule_periodic(&mut self, now: Instant, interval: Duration) -> TimerHandle;

    /// Returns `false` when the handle was unknown (already fired or cancelled).
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Handles due at `now`, earliest first. One-shot timers are removed,
    /// periodic ones are rearmed for their next slot after `now`.
    fn poll(&mut self, now: Instant) -> Vec<TimerHandle>;
}

#[derive(Debug)]
struct Timer {
    handle: TimerHandle,
    due: Instant,
    every: Option<Duration>,
}

/// First `due + k * every` (k >= 1) strictly after `now`, for `due <= now`.
fn next_slot_after(due: Instant, every: Duration, now: Instant) -> Instant {
    let behind = now.saturating_duration_since(due).as_nanos();
    let slots = behind / every.as_nanos().max(1) + 1;
    let ahead = every.as_nanos().saturating_mul(slots);
    due + Duration::from_nanos(u64::try_from(ahead).unwrap_or(u64::MAX))
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers still armed.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Earliest due instant, if anything is armed.
    pub fn next_due(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.due).min()
    }

    fn insert(&mut self, due: Instant, every: Option<Duration>) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { handle, due, every });
        handle
    }
}

impl Scheduler for TimerQueue {
    fn schedule_once(&mut self, now: Instant, delay: Duration) -> TimerHandle {
        self.insert(now + delay, None)
    }

    fn schedule_periodic(&mut self, now: Instant, interval: Duration) -> TimerHandle {
        // A zero interval would rearm into the past forever.
        let interval = interval.max(Duration::from_millis(1));
        self.insert(now + interval, Some(interval))
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    fn poll(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut fired: Vec<(Instant, TimerHandle)> = Vec::new();

        self.timers.retain_mut(|t| {
            if t.due > now {
                return true;
            }
            fired.push((t.due, t.handle));
            match t.every {
                Some(every) => {
                    // Late polls fire once and skip the missed slots.
                    t.due = next_slot_after(t.due, every, now);
                    true
                }
                None => false,
            }
        });

        fired.sort_by_key(|(due, handle)| (*due, handle.0));
        fired.into_iter().map(|(_, h)| h).collect()
    }
}
