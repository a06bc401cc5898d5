//! Playback engine used by the virtual drive.
//!
//! The transport only talks to the [`PlaybackEngine`] trait. [`AudioPlayer`]
//! implements it on top of rodio, with the output stream living on a
//! dedicated audio thread that receives [`EngineCmd`] messages.

mod engine;
mod player;
mod sink;
mod thread;
mod types;

pub use engine::{PlaybackEngine, percent_to_gain, read_length};
pub use player::AudioPlayer;
pub use types::{EngineCmd, PlaybackHandle, PlaybackInfo};

#[cfg(test)]
pub(crate) mod mock;
