//! Messages and shared handles of the rodio audio thread.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
pub enum EngineCmd {
    /// Replace the current item with `path`; the outcome is sent back on `reply`.
    Play { path: PathBuf, reply: Sender<bool> },
    /// Stop playback immediately.
    Stop,
    /// Set the output gain (0.0 - 1.0).
    SetVolume(f32),
    /// Stop playback and end the audio thread.
    Quit,
}

/// Output state published by the audio thread.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    /// Whether the sink still has queued audio.
    pub busy: bool,
    /// Gain applied to new and current sinks.
    pub volume: f32,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            busy: false,
            volume: 1.0,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
