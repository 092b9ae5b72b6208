//! In-memory stand-ins for the audio backend and the clock, shared by the
//! session and runtime tests.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::clock::Clock;
use crate::audio::{AssetUnavailable, AudioBackend, Looping, UnavailableReason};

#[derive(Clone)]
pub struct ManualClock(Rc<Cell<Instant>>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }

    pub fn advance(&self, d: Duration) {
        self.0.set(self.0.get() + d);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

#[derive(Default)]
pub struct FakeAudio {
    next_id: u32,
    pub loaded: Vec<String>,
    pub played: Vec<(u32, Looping)>,
    pub stopped: Vec<u32>,
    pub unavailable: HashSet<String>,
}

pub struct FakeHandle(pub u32);

#[derive(Clone, Default)]
pub struct FakeBackend(pub Rc<RefCell<FakeAudio>>);

impl AudioBackend for FakeBackend {
    type Handle = FakeHandle;

    fn load(&mut self, asset_id: &str) -> Result<FakeHandle, AssetUnavailable> {
        let mut audio = self.0.borrow_mut();
        if audio.unavailable.contains(asset_id) {
            return Err(AssetUnavailable::new(
                asset_id,
                UnavailableReason::Missing(PathBuf::from(format!("{asset_id}.mp3"))),
            ));
        }
        audio.loaded.push(asset_id.to_string());
        audio.next_id += 1;
        Ok(FakeHandle(audio.next_id))
    }

    fn play(&mut self, handle: &mut FakeHandle, looping: Looping) {
        self.0.borrow_mut().played.push((handle.0, looping));
    }

    fn stop(&mut self, handle: FakeHandle) {
        self.0.borrow_mut().stopped.push(handle.0);
    }
}
