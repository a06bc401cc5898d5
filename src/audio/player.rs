use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::engine::{PlaybackEngine, percent_to_gain, read_length};
use super::thread::spawn_audio_thread;
use super::types::{EngineCmd, PlaybackHandle, PlaybackInfo};

/// rodio-backed [`PlaybackEngine`].
pub struct AudioPlayer {
    tx: Sender<EngineCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(settings: &AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo {
            volume: percent_to_gain(settings.initial_volume),
            ..PlaybackInfo::default()
        }));

        let audio_handle = spawn_audio_thread(
            rx,
            playback_info.clone(),
            Duration::from_millis(settings.poll_interval_ms.max(1)),
        );

        Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn send(&self, cmd: EngineCmd) -> Result<(), mpsc::SendError<EngineCmd>> {
        self.tx.send(cmd)
    }

    /// Stop playback and wait for the audio thread to exit.
    pub fn shutdown(&self) {
        let _ = self.send(EngineCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl PlaybackEngine for AudioPlayer {
    fn play(&self, path: &Path) -> bool {
        let (reply, outcome) = mpsc::channel();
        let cmd = EngineCmd::Play {
            path: path.to_path_buf(),
            reply,
        };
        if self.send(cmd).is_err() {
            return false;
        }
        outcome.recv().unwrap_or(false)
    }

    fn stop(&self) {
        if let Ok(mut info) = self.playback.lock() {
            info.busy = false;
        }
        let _ = self.send(EngineCmd::Stop);
    }

    fn pump(&self) -> bool {
        self.playback.lock().map(|info| info.busy).unwrap_or(false)
    }

    fn set_volume(&self, percent: u8) {
        let _ = self.send(EngineCmd::SetVolume(percent_to_gain(percent)));
    }

    fn length(&self, path: &Path) -> u32 {
        read_length(path)
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
