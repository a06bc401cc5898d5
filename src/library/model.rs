use std::path::PathBuf;

/// One numbered slot on the virtual disc.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    /// Audio file for this slot; empty when the slot is an unplayable placeholder.
    pub path: PathBuf,
    /// Length read from the file, in seconds.
    pub length: u32,
    /// Offset of the slot's start within the disc, in seconds.
    pub position: u32,
}

impl Track {
    pub fn is_playable(&self) -> bool {
        !self.path.as_os_str().is_empty()
    }
}
