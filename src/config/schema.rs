use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/vcdaudio/config.toml` or `~/.config/vcdaudio/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `VCDAUDIO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub audio: AudioSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory holding the ripped tracks (`Track01.ogg`, `Track02.ogg`, ...).
    pub music_dir: PathBuf,
    /// File stem prefix placed before the two-digit track number.
    pub file_prefix: String,
    /// File extensions to try for each slot, in order of preference
    /// (case-insensitive, without dot).
    pub extensions: Vec<String>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            music_dir: PathBuf::from("MUSIC"),
            file_prefix: "Track".to_string(),
            extensions: vec!["ogg".into(), "flac".into(), "mp3".into(), "wav".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Output volume applied when the engine starts (percent, 0-100).
    pub initial_volume: u8,
    /// How often the playback loop checks whether the current track ended (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 100,
            poll_interval_ms: 25,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Write logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}
