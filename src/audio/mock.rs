//! Scriptable in-memory engine for exercising the transport without audio output.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::engine::PlaybackEngine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Play(PathBuf),
    Stop,
    Volume(u8),
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    busy: bool,
    fail_play: bool,
    pumps_per_track: Option<usize>,
    pumps_left: usize,
    lengths: HashMap<PathBuf, u32>,
}

/// Tracks play forever unless `pumps_per_track` is set or `finish` is called.
#[derive(Default)]
pub(crate) struct MockEngine {
    state: Mutex<MockState>,
}

impl MockEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every track ends after `n` calls to `pump`.
    pub(crate) fn with_pumps_per_track(n: usize) -> Self {
        let engine = Self::default();
        engine.lock().pumps_per_track = Some(n);
        engine
    }

    pub(crate) fn with_lengths(lengths: &[(&str, u32)]) -> Self {
        let engine = Self::default();
        engine.lock().lengths = lengths
            .iter()
            .map(|(p, l)| (PathBuf::from(p), *l))
            .collect();
        engine
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn fail_play(&self, fail: bool) {
        self.lock().fail_play = fail;
    }

    /// End the current track as if it played to completion.
    pub(crate) fn finish(&self) {
        self.lock().busy = false;
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub(crate) fn played(&self) -> Vec<PathBuf> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Play(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn stops(&self) -> usize {
        self.lock().calls.iter().filter(|c| **c == Call::Stop).count()
    }
}

impl PlaybackEngine for MockEngine {
    fn play(&self, path: &Path) -> bool {
        let mut s = self.lock();
        s.calls.push(Call::Play(path.to_path_buf()));
        if s.fail_play {
            s.busy = false;
            return false;
        }
        s.busy = true;
        s.pumps_left = s.pumps_per_track.unwrap_or(0);
        true
    }

    fn stop(&self) {
        let mut s = self.lock();
        s.calls.push(Call::Stop);
        s.busy = false;
    }

    fn pump(&self) -> bool {
        let mut s = self.lock();
        if !s.busy {
            return false;
        }
        if s.pumps_per_track.is_some() {
            if s.pumps_left == 0 {
                s.busy = false;
                return false;
            }
            s.pumps_left -= 1;
        }
        true
    }

    fn set_volume(&self, percent: u8) {
        self.lock().calls.push(Call::Volume(percent));
    }

    fn length(&self, path: &Path) -> u32 {
        self.lock().lengths.get(path).copied().unwrap_or(0)
    }
}
