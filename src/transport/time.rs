//! Time formats and the packed time codes used by CD-audio commands.

use std::fmt;

use crate::error::MciError;

/// Unit in which play offsets and status lengths are expressed.
///
/// Discriminants are the legacy numeric format ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum TimeFormat {
    Milliseconds = 0,
    Hms = 1,
    Msf = 2,
    Frames = 3,
    Smpte24 = 4,
    Smpte25 = 5,
    Smpte30 = 6,
    Smpte30Drop = 7,
    Bytes = 8,
    Samples = 9,
    #[default]
    Tmsf = 10,
}

impl TimeFormat {
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Keyword used by the string command surface.
    pub fn name(self) -> &'static str {
        match self {
            TimeFormat::Milliseconds => "milliseconds",
            TimeFormat::Hms => "hms",
            TimeFormat::Msf => "msf",
            TimeFormat::Frames => "frames",
            TimeFormat::Smpte24 => "smpte 24",
            TimeFormat::Smpte25 => "smpte 25",
            TimeFormat::Smpte30 => "smpte 30",
            TimeFormat::Smpte30Drop => "smpte 30 drop",
            TimeFormat::Bytes => "bytes",
            TimeFormat::Samples => "samples",
            TimeFormat::Tmsf => "tmsf",
        }
    }
}

impl TryFrom<u32> for TimeFormat {
    type Error = MciError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Ok(match raw {
            0 => TimeFormat::Milliseconds,
            1 => TimeFormat::Hms,
            2 => TimeFormat::Msf,
            3 => TimeFormat::Frames,
            4 => TimeFormat::Smpte24,
            5 => TimeFormat::Smpte25,
            6 => TimeFormat::Smpte30,
            7 => TimeFormat::Smpte30Drop,
            8 => TimeFormat::Bytes,
            9 => TimeFormat::Samples,
            10 => TimeFormat::Tmsf,
            other => return Err(MciError::UnsupportedTimeFormat(other)),
        })
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Track/minute/second/frame packed one byte each, track in the low byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tmsf {
    pub track: u8,
    pub minute: u8,
    pub second: u8,
    pub frame: u8,
}

impl Tmsf {
    pub fn from_packed(value: u32) -> Self {
        let [track, minute, second, frame] = value.to_le_bytes();
        Self {
            track,
            minute,
            second,
            frame,
        }
    }

    pub fn packed(self) -> u32 {
        u32::from_le_bytes([self.track, self.minute, self.second, self.frame])
    }
}

/// Minute/second/frame packed into the low three bytes, minute lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Msf {
    pub minute: u8,
    pub second: u8,
    pub frame: u8,
}

impl Msf {
    /// Whole seconds as minutes and seconds; minutes saturate at 255.
    pub fn from_seconds(seconds: u32) -> Self {
        Self {
            minute: u8::try_from(seconds / 60).unwrap_or(u8::MAX),
            second: (seconds % 60) as u8,
            frame: 0,
        }
    }

    pub fn packed(self) -> u32 {
        u32::from_le_bytes([self.minute, self.second, self.frame, 0])
    }
}
