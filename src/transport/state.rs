//! Transport state and the translation of play offsets into a track range.

use tracing::debug;

use crate::library::Catalog;

use super::time::{TimeFormat, Tmsf};

/// Tracks queued for sequential playback, `last` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayRange {
    pub first: usize,
    pub last: usize,
}

impl PlayRange {
    /// The range holding only the first playable track, or an empty range
    /// when the disc has nothing to play.
    pub fn initial(catalog: &Catalog) -> Self {
        catalog
            .first_playable()
            .map(|first| PlayRange {
                first,
                last: first + 1,
            })
            .unwrap_or_default()
    }
}

/// Everything the command interpreter and the playback loop share.
#[derive(Debug, Clone, Default)]
pub struct TransportState {
    pub time_format: TimeFormat,
    pub playing: bool,
    pub closed: bool,
    /// A new range was queued and the loop has not picked it up yet.
    pub update_pending: bool,
    pub play_range: PlayRange,
    pub current_track: usize,
    /// Bumped by every command that writes `playing`.
    pub(crate) revision: u64,
}

impl TransportState {
    pub fn new(catalog: &Catalog) -> Self {
        let play_range = PlayRange::initial(catalog);
        Self {
            play_range,
            current_track: play_range.first,
            ..Self::default()
        }
    }

    pub(crate) fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Update `play_range` from play offsets in the current time format.
    ///
    /// Returns `true` when the call should (re)start playback, i.e. a `from`
    /// offset was given and the disc has something to play.
    pub fn apply_play(&mut self, catalog: &Catalog, from: Option<u32>, to: Option<u32>) -> bool {
        let (Some(lo), Some(hi)) = (catalog.first_playable(), catalog.last_playable()) else {
            debug!("play ignored, no playable tracks");
            return false;
        };

        let mut range = self.play_range;

        if let Some(from) = from {
            range.first = match self.time_format {
                // zero keeps the previous start
                TimeFormat::Tmsf if from == 0 => range.first,
                TimeFormat::Tmsf => usize::from(Tmsf::from_packed(from).track),
                TimeFormat::Milliseconds => catalog.track_at_second(from / 1000).unwrap_or(0),
                _ => index_from_raw(from),
            }
            .clamp(lo, hi);
            range.last = range.first;
            debug!("play from {from} -> track {}", range.first);
        }

        if let Some(to) = to {
            range.last = match self.time_format {
                TimeFormat::Tmsf if to == 0 => range.last,
                TimeFormat::Tmsf => usize::from(Tmsf::from_packed(to).track),
                // The track still sounding at `to` is played to its end.
                TimeFormat::Milliseconds => catalog
                    .track_ending_after(to / 1000, range.first)
                    .map_or(hi + 1, |t| t + 1),
                _ => index_from_raw(to),
            };
            debug!("play to {to} -> track {}", range.last);
        }

        if range.last <= range.first {
            range.last = range.first + 1;
        }
        range.last = range.last.min(hi + 1);

        self.play_range = range;
        from.is_some()
    }
}

fn index_from_raw(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
