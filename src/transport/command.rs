//! Typed control messages understood by the virtual drive.

use super::time::TimeFormat;

/// Device id handed out when a CD-audio device is opened.
pub const VIRTUAL_DEVICE_ID: u32 = 0xBEEF;
/// Broadcast id addressing every open device.
pub const ALL_DEVICES_ID: u32 = 0xFFFF_FFFF;

/// Numeric device class of CD-audio devices.
pub const DEVTYPE_CD_AUDIO: u32 = 516;
/// Device name of CD-audio devices.
pub const CD_AUDIO_DEVICE_NAME: &str = "cdaudio";

pub const MODE_STOP: u32 = 525;
pub const MODE_PLAY: u32 = 526;

pub const TRACK_TYPE_AUDIO: u32 = 1088;
pub const TRACK_TYPE_OTHER: u32 = 1089;

/// Legacy message ids, used for logging.
pub const MSG_OPEN: u32 = 0x0803;
pub const MSG_CLOSE: u32 = 0x0804;
pub const MSG_PLAY: u32 = 0x0806;
pub const MSG_STOP: u32 = 0x0808;
pub const MSG_SET: u32 = 0x080D;
pub const MSG_STATUS: u32 = 0x0814;

/// How the caller names the device it wants to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceType {
    Id(u32),
    Name(String),
}

impl DeviceType {
    pub fn is_cd_audio(&self) -> bool {
        match self {
            DeviceType::Id(id) => *id == DEVTYPE_CD_AUDIO,
            DeviceType::Name(name) => name == CD_AUDIO_DEVICE_NAME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusItem {
    Length,
    Position,
    NumberOfTracks,
    Mode,
    MediaPresent,
    TimeFormat,
    Ready,
    CurrentTrack,
    Start,
    /// Whether a given track holds audio or data.
    TrackType,
    Other(u32),
}

impl StatusItem {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => StatusItem::Length,
            2 => StatusItem::Position,
            3 => StatusItem::NumberOfTracks,
            4 => StatusItem::Mode,
            5 => StatusItem::MediaPresent,
            6 => StatusItem::TimeFormat,
            7 => StatusItem::Ready,
            8 => StatusItem::CurrentTrack,
            0x200 => StatusItem::Start,
            0x4001 => StatusItem::TrackType,
            other => StatusItem::Other(other),
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            StatusItem::Length => 1,
            StatusItem::Position => 2,
            StatusItem::NumberOfTracks => 3,
            StatusItem::Mode => 4,
            StatusItem::MediaPresent => 5,
            StatusItem::TimeFormat => 6,
            StatusItem::Ready => 7,
            StatusItem::CurrentTrack => 8,
            StatusItem::Start => 0x200,
            StatusItem::TrackType => 0x4001,
            StatusItem::Other(raw) => raw,
        }
    }
}

/// A control message with the optional fields its flags would select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open {
        device_type: DeviceType,
        alias: Option<String>,
    },
    Close,
    /// Offsets are interpreted in the current time format.
    Play {
        from: Option<u32>,
        to: Option<u32>,
    },
    Stop,
    Set {
        time_format: Option<TimeFormat>,
    },
    Status {
        item: StatusItem,
        track: Option<u32>,
    },
    /// A message the virtual drive does not model, by legacy id.
    Other(u32),
}

impl Command {
    pub fn message(&self) -> u32 {
        match self {
            Command::Open { .. } => MSG_OPEN,
            Command::Close => MSG_CLOSE,
            Command::Play { .. } => MSG_PLAY,
            Command::Stop => MSG_STOP,
            Command::Set { .. } => MSG_SET,
            Command::Status { .. } => MSG_STATUS,
            Command::Other(msg) => *msg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Done,
    Opened { device_id: u32 },
    Value(u32),
}
