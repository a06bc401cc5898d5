//! The CD transport: command interpreter, shared state and the playback loop.
//!
//! [`Device`] owns a [`Catalog`](crate::library::Catalog) and an engine. Commands
//! mutate a mutex-guarded [`TransportState`] and notify a condvar; a single
//! background loop, started on the first play, walks the queued range.

mod command;
mod device;
mod playback;
mod state;
mod time;

pub use command::{
    ALL_DEVICES_ID, CD_AUDIO_DEVICE_NAME, Command, DEVTYPE_CD_AUDIO, DeviceType, MODE_PLAY,
    MODE_STOP, Reply, StatusItem, TRACK_TYPE_AUDIO, TRACK_TYPE_OTHER, VIRTUAL_DEVICE_ID,
};
pub use device::Device;
pub use state::{PlayRange, TransportState};
pub use time::{Msf, TimeFormat, Tmsf};
