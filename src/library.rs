//! Track library: maps numbered audio files in the music directory onto the
//! slots of the virtual disc.
//!
//! `scan` resolves a file path for every slot and `Catalog` records lengths
//! and absolute disc positions for them.

mod catalog;
mod model;
mod scan;

pub use catalog::{Catalog, MAX_TRACKS, MIN_PLAYABLE_SECONDS, PLACEHOLDER_SECONDS};
pub use model::Track;
pub use scan::{scan, slot_stem};
