//! The virtual disc's table of contents.
//!
//! Every slot keeps its measured length and its absolute start position on the
//! disc. Slots whose file is missing or too short are kept as placeholders:
//! they cannot be played but still occupy disc time, so seeks by absolute
//! time land on the same tracks a real disc would report.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::model::Track;

/// Number of slots on the virtual disc.
pub const MAX_TRACKS: usize = 99;

/// Reported lengths below this are treated as "no file".
pub const MIN_PLAYABLE_SECONDS: u32 = 4;

/// Disc time occupied by an unplayable slot.
pub const PLACEHOLDER_SECONDS: u32 = 4;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
    first: Option<usize>,
    last: Option<usize>,
    count: usize,
}

impl Catalog {
    /// Build the catalog from one path per slot, asking `measure` for each length.
    ///
    /// At most [`MAX_TRACKS`] paths are consumed.
    pub fn build<I, F>(paths: I, mut measure: F) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
        F: FnMut(&Path) -> u32,
    {
        let mut catalog = Catalog::default();
        let mut position: u32 = 0;

        for (i, path) in paths.into_iter().take(MAX_TRACKS).enumerate() {
            let length = measure(&path);

            if length < MIN_PLAYABLE_SECONDS {
                catalog.tracks.push(Track {
                    path: PathBuf::new(),
                    length,
                    position,
                });
                position = position.saturating_add(PLACEHOLDER_SECONDS);
                continue;
            }

            debug!(
                "Track {i:02}: {:02}:{:02} @ {position} seconds ({})",
                length / 60,
                length % 60,
                path.display()
            );

            catalog.first.get_or_insert(i);
            catalog.last = Some(i);
            catalog.count += 1;
            catalog.tracks.push(Track {
                path,
                length,
                position,
            });
            position = position.saturating_add(length);
        }

        info!("Emulating total of {} CD tracks", catalog.count);
        catalog
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Any slot, playable or not.
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// A slot that can actually be played; `None` for placeholders and
    /// out-of-range indices.
    pub fn lookup(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index).filter(|t| t.is_playable())
    }

    pub fn first_playable(&self) -> Option<usize> {
        self.first
    }

    pub fn last_playable(&self) -> Option<usize> {
        self.last
    }

    pub fn playable_count(&self) -> usize {
        self.count
    }

    pub fn has_media(&self) -> bool {
        self.count > 0
    }

    /// The slot starting exactly at `second`, if any.
    pub fn track_at_second(&self, second: u32) -> Option<usize> {
        self.tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.position == second)
            .map(|(i, _)| i)
            .last()
    }

    /// The first slot at or after `from` that is still sounding at `second`.
    pub fn track_ending_after(&self, second: u32, from: usize) -> Option<usize> {
        self.tracks
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, t)| t.position.saturating_add(t.length) > second)
            .map(|(i, _)| i)
    }

    /// Disc time up to the end of the last playable track, in seconds.
    pub fn disc_length(&self) -> u32 {
        self.last
            .and_then(|i| self.tracks.get(i))
            .map(|t| t.position.saturating_add(t.length))
            .unwrap_or(0)
    }
}
