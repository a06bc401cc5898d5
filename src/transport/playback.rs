//! The background activity that walks the play range track by track.
//!
//! `PlaybackLoop` is a plain value driven by [`PlaybackLoop::step`]; the
//! thread started by [`spawn_playback_loop`] only adds the waiting between
//! steps. The loop blocks indefinitely in exactly one place: while stopped,
//! until a command sets `playing` or `closed` and notifies the condvar.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::PlaybackEngine;
use crate::library::Catalog;

use super::state::TransportState;

/// Transport state plus the condvar commands use to wake the loop.
#[derive(Debug)]
pub(crate) struct Shared {
    state: Mutex<TransportState>,
    wake: Condvar,
}

impl Shared {
    pub(crate) fn new(state: TransportState) -> Self {
        Self {
            state: Mutex::new(state),
            wake: Condvar::new(),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, TransportState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn notify(&self) {
        self.wake.notify_all();
    }
}

/// Outcome of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Poll {
    /// The current track is still playing.
    Playing,
    /// Playback is stopped; the engine was stopped and the loop should wait.
    Suspended,
    /// The current track ended and the next one was started.
    Advanced,
    /// A new range was picked up and its first track started.
    Restarted,
    /// The device closed; the engine was stopped for good.
    Closed,
}

pub(crate) struct PlaybackLoop<E: PlaybackEngine> {
    shared: Arc<Shared>,
    catalog: Arc<Catalog>,
    engine: Arc<E>,
    first: usize,
    last: usize,
    current: usize,
}

impl<E: PlaybackEngine> PlaybackLoop<E> {
    pub(crate) fn new(shared: Arc<Shared>, catalog: Arc<Catalog>, engine: Arc<E>) -> Self {
        Self {
            shared,
            catalog,
            engine,
            first: 0,
            last: 0,
            current: 0,
        }
    }

    pub(crate) fn current(&self) -> usize {
        self.current
    }

    /// Pick up a pending range if there is one, then start `current`.
    /// Placeholder slots inside the range are skipped.
    pub(crate) fn start_track(&mut self) {
        let (path, revision) = {
            let mut st = self.shared.lock();
            if st.closed {
                return;
            }

            if st.update_pending {
                let range = st.play_range;
                self.first = range.first;
                // `last` is exclusive
                self.last = if range.last == range.first {
                    range.first + 1
                } else {
                    range.last
                };
                self.current = self.first;
                st.update_pending = false;
                debug!("new play range {:02}..{:02}", self.first, self.last);
            }

            while self.current < self.last && self.catalog.lookup(self.current).is_none() {
                debug!("skipping track {:02}, not playable", self.current);
                self.current += 1;
            }

            st.current_track = self.current;

            let Some(track) = self
                .catalog
                .lookup(self.current)
                .filter(|_| self.current < self.last)
            else {
                debug!("end of play range at track {:02}", self.current);
                st.playing = false;
                return;
            };

            (track.path.clone(), st.revision)
        };

        debug!("Next track: {}", path.display());
        let ok = self.engine.play(&path);
        if !ok {
            warn!("engine could not play {}", path.display());
        }

        let mut st = self.shared.lock();
        // A command that arrived while the engine was busy has the last word.
        if st.revision == revision {
            st.playing = ok;
        }
    }

    /// Run one poll cycle and perform the transition it calls for, without
    /// blocking.
    pub(crate) fn step(&mut self) -> Poll {
        {
            let st = self.shared.lock();
            if st.closed {
                drop(st);
                self.shutdown();
                return Poll::Closed;
            }
            if !st.playing {
                drop(st);
                self.engine.stop();
                return Poll::Suspended;
            }
            if st.update_pending {
                drop(st);
                self.start_track();
                return Poll::Restarted;
            }
        }

        if !self.engine.pump() {
            self.current += 1;
            self.start_track();
            return Poll::Advanced;
        }

        Poll::Playing
    }

    fn shutdown(&self) {
        self.engine.stop();
        self.shared.lock().playing = false;
    }

    /// Block until a command resumes playback or closes the device.
    fn wait_for_wake(&self) {
        let guard = self.shared.lock();
        let _guard = self
            .shared
            .wake
            .wait_while(guard, |st| !st.playing && !st.closed)
            .unwrap_or_else(|poisoned| poisoned.into_inner());
    }

    /// Sleep until the next poll unless a command is already waiting.
    fn idle(&self, interval: Duration) {
        let guard = self.shared.lock();
        if guard.closed || !guard.playing || guard.update_pending {
            return;
        }
        let _ = self
            .shared
            .wake
            .wait_timeout(guard, interval)
            .unwrap_or_else(|poisoned| poisoned.into_inner());
    }

    pub(crate) fn run(mut self, poll_interval: Duration) {
        self.start_track();
        loop {
            match self.step() {
                Poll::Closed => break,
                Poll::Suspended => self.wait_for_wake(),
                Poll::Playing => self.idle(poll_interval),
                Poll::Advanced | Poll::Restarted => {}
            }
        }
        info!("playback loop finished at track {:02}", self.current());
    }
}

pub(crate) fn spawn_playback_loop<E: PlaybackEngine>(
    shared: Arc<Shared>,
    catalog: Arc<Catalog>,
    engine: Arc<E>,
    poll_interval: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || PlaybackLoop::new(shared, catalog, engine).run(poll_interval))
}
