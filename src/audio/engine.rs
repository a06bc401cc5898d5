use std::path::Path;

use lofty::prelude::*;

/// Primitives the virtual drive needs from an audio backend.
///
/// Implementations are shared between the command side (volume, length
/// probing) and the playback loop thread, so every method takes `&self`.
pub trait PlaybackEngine: Send + Sync + 'static {
    /// Start playing `path` from the beginning, replacing the current item.
    /// Returns `false` when the file cannot be opened or decoded.
    fn play(&self, path: &Path) -> bool;

    /// Stop the current item. Harmless when nothing is playing.
    fn stop(&self);

    /// `true` while the current item is still producing sound.
    fn pump(&self) -> bool;

    /// Output volume in percent (0-100).
    fn set_volume(&self, percent: u8);

    /// Length of `path` in whole seconds, 0 when missing or unreadable.
    fn length(&self, path: &Path) -> u32;
}

/// Read the duration of an audio file from its container metadata.
pub fn read_length(path: &Path) -> u32 {
    match lofty::read_from_path(path) {
        Ok(tagged) => u32::try_from(tagged.properties().duration().as_secs()).unwrap_or(u32::MAX),
        Err(_) => 0,
    }
}

/// Map a 0-100 percentage onto rodio's linear gain.
pub fn percent_to_gain(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}
