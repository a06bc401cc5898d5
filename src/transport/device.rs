use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};

use crate::audio::PlaybackEngine;
use crate::error::MciError;
use crate::library::Catalog;

use super::command::{
    Command, DeviceType, MODE_PLAY, MODE_STOP, Reply, StatusItem, TRACK_TYPE_AUDIO,
    TRACK_TYPE_OTHER, VIRTUAL_DEVICE_ID,
};
use super::playback::{Shared, spawn_playback_loop};
use super::state::TransportState;
use super::time::{Msf, TimeFormat};

/// The virtual CD drive: command interpreter plus the playback loop it owns.
pub struct Device<E: PlaybackEngine> {
    catalog: Arc<Catalog>,
    engine: Arc<E>,
    shared: Arc<Shared>,
    player: Mutex<Option<JoinHandle<()>>>,
    poll_interval: Duration,
}

impl<E: PlaybackEngine> Device<E> {
    pub fn new(catalog: Catalog, engine: Arc<E>, poll_interval: Duration) -> Self {
        let state = TransportState::new(&catalog);
        Self {
            catalog: Arc::new(catalog),
            engine,
            shared: Arc::new(Shared::new(state)),
            player: Mutex::new(None),
            poll_interval,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Snapshot of the transport state.
    pub fn state(&self) -> TransportState {
        self.shared.lock().clone()
    }

    pub fn open(&self, device_type: &DeviceType) -> Result<u32, MciError> {
        if device_type.is_cd_audio() {
            debug!("returning virtual device id for {device_type:?}");
            Ok(VIRTUAL_DEVICE_ID)
        } else {
            debug!("not a CD audio device: {device_type:?}");
            Err(MciError::UnrecognizedCommand)
        }
    }

    pub fn set_time_format(&self, time_format: TimeFormat) {
        debug!("time format {time_format}");
        self.shared.lock().time_format = time_format;
    }

    /// Stop playback and end the playback loop. Safe to call repeatedly.
    pub fn close(&self) {
        // Held until the join so a concurrent play cannot spawn a second loop.
        let mut player = self.lock_player();
        let handle = player.take();

        {
            let mut st = self.shared.lock();
            if handle.is_some() {
                st.closed = true;
            }
            st.playing = false;
            st.bump_revision();
        }
        self.shared.notify();

        if let Some(h) = handle {
            if h.join().is_err() {
                warn!("playback loop panicked");
            }
        }
    }

    pub fn play(&self, from: Option<u32>, to: Option<u32>) {
        let mut player = self.lock_player();

        let start = {
            let mut st = self.shared.lock();
            let start = st.apply_play(&self.catalog, from, to);
            debug!(
                "play range {}..{} ({})",
                st.play_range.first, st.play_range.last, st.time_format
            );
            if start {
                st.update_pending = true;
                st.playing = true;
                st.bump_revision();
                if player.is_none() {
                    st.closed = false;
                }
            }
            start
        };

        if !start {
            return;
        }

        match player.as_ref() {
            Some(_) => self.shared.notify(),
            None => {
                *player = Some(spawn_playback_loop(
                    self.shared.clone(),
                    self.catalog.clone(),
                    self.engine.clone(),
                    self.poll_interval,
                ));
            }
        }
    }

    pub fn stop(&self) {
        {
            let mut st = self.shared.lock();
            st.playing = false;
            st.bump_revision();
        }
        self.shared.notify();
    }

    pub fn status(&self, item: StatusItem, track: Option<u32>) -> u32 {
        let st = self.shared.lock();
        let slot = track
            .and_then(|t| usize::try_from(t).ok())
            .and_then(|t| self.catalog.get(t));

        let value = match item {
            StatusItem::Length => {
                let seconds = match track {
                    Some(_) => slot.map_or(0, |t| t.length),
                    None => self.catalog.disc_length(),
                };
                match (seconds, st.time_format) {
                    (0, _) => 0,
                    (s, TimeFormat::Milliseconds) => s.saturating_mul(1000),
                    (s, _) => Msf::from_seconds(s).packed(),
                }
            }
            // always milliseconds, whatever the time format
            StatusItem::Position => slot.map_or(0, |t| t.position.saturating_mul(1000)),
            StatusItem::NumberOfTracks => count_u32(self.catalog.playable_count()),
            StatusItem::Mode => {
                if st.playing {
                    MODE_PLAY
                } else {
                    MODE_STOP
                }
            }
            StatusItem::MediaPresent => u32::from(self.catalog.has_media()),
            StatusItem::Ready => u32::from(self.catalog.playable_count() > 0),
            StatusItem::CurrentTrack => count_u32(st.current_track),
            StatusItem::TimeFormat => st.time_format.raw(),
            StatusItem::TrackType => match slot {
                Some(t) if t.is_playable() => TRACK_TYPE_AUDIO,
                Some(_) => TRACK_TYPE_OTHER,
                None => 0,
            },
            StatusItem::Start | StatusItem::Other(_) => 0,
        };

        debug!("status {item:?} track {track:?} -> {value}");
        value
    }

    /// Interpret one control message.
    pub fn execute(&self, command: Command) -> Result<Reply, MciError> {
        match command {
            Command::Open { device_type, .. } => self
                .open(&device_type)
                .map(|device_id| Reply::Opened { device_id }),
            Command::Close => {
                self.close();
                Ok(Reply::Done)
            }
            Command::Play { from, to } => {
                self.play(from, to);
                Ok(Reply::Done)
            }
            Command::Stop => {
                self.stop();
                Ok(Reply::Done)
            }
            Command::Set { time_format } => {
                if let Some(f) = time_format {
                    self.set_time_format(f);
                }
                Ok(Reply::Done)
            }
            Command::Status { item, track } => Ok(Reply::Value(self.status(item, track))),
            Command::Other(msg) => {
                debug!("unhandled message {msg:#06x}");
                Err(MciError::UnrecognizedCommand)
            }
        }
    }

    pub fn set_volume(&self, percent: u8) {
        self.engine.set_volume(percent);
    }

    fn lock_player(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.player
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<E: PlaybackEngine> Drop for Device<E> {
    fn drop(&mut self) {
        self.close();
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
