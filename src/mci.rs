//! Legacy command surfaces of the virtual drive.
//!
//! [`Mci`] is the context object a host talks to. It routes structured
//! commands by device id, interprets free-text sentences and exposes the
//! auxiliary CD-audio volume line.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::audio::PlaybackEngine;
use crate::error::MciError;
use crate::transport::{
    ALL_DEVICES_ID, CD_AUDIO_DEVICE_NAME, Command, Device, DeviceType, MODE_PLAY, Reply,
    StatusItem, VIRTUAL_DEVICE_ID,
};

mod aux_device;
mod string;

pub use aux_device::{
    AUX_DEVICE_NAME, AUX_DRIVER_VERSION, AUX_MANUFACTURER_ID, AUX_PRODUCT_ID, AUXCAPS_CDAUDIO,
    AUXCAPS_VOLUME, AuxCaps, volume_percent,
};
pub use string::{CD_SHORT_NAME, Sentence, StatusQuery, parse_sentence};

use aux_device::AuxVolume;

/// Number of auxiliary devices the virtual drive exposes.
pub const AUX_DEVICE_COUNT: u32 = 1;

pub struct Mci<E: PlaybackEngine> {
    device: Device<E>,
    aliases: Mutex<Vec<String>>,
    aux_volume: AuxVolume,
}

impl<E: PlaybackEngine> Mci<E> {
    pub fn new(device: Device<E>) -> Self {
        Self {
            device,
            aliases: Mutex::new(Vec::new()),
            aux_volume: AuxVolume::default(),
        }
    }

    pub fn device(&self) -> &Device<E> {
        &self.device
    }

    /// Device ids the virtual drive answers to besides its own.
    pub fn accepts(device_id: u32) -> bool {
        matches!(device_id, VIRTUAL_DEVICE_ID | 0 | ALL_DEVICES_ID)
    }

    /// Dispatch a structured command.
    ///
    /// Open is answered whatever the id; everything else must address the
    /// virtual drive, otherwise the caller gets `UnrecognizedCommand` and is
    /// expected to forward the request elsewhere.
    pub fn send_command(&self, device_id: u32, command: Command) -> Result<Reply, MciError> {
        debug!(
            "command {:#06x} for device {device_id:#x}",
            command.message()
        );

        match command {
            Command::Open { device_type, alias } => {
                let id = self.device.open(&device_type)?;
                if let Some(alias) = alias {
                    self.add_alias(alias);
                }
                Ok(Reply::Opened { device_id: id })
            }
            _ if !Self::accepts(device_id) => {
                debug!("device {device_id:#x} is not ours");
                Err(MciError::UnrecognizedCommand)
            }
            Command::Close => {
                self.lock_aliases().clear();
                self.device.execute(Command::Close)
            }
            other => self.device.execute(other),
        }
    }

    /// Interpret a free-text command and return its textual reply.
    pub fn send_string(&self, input: &str) -> Result<String, MciError> {
        let sentence = {
            let aliases = self.lock_aliases();
            parse_sentence(input, &aliases)?
        };
        debug!("{input:?} -> {sentence:?}");

        let reply = match sentence {
            Sentence::SysInfo => CD_SHORT_NAME.to_string(),
            Sentence::Open { alias } => {
                let command = Command::Open {
                    device_type: DeviceType::Name(CD_AUDIO_DEVICE_NAME.to_string()),
                    alias,
                };
                match self.send_command(VIRTUAL_DEVICE_ID, command)? {
                    Reply::Opened { device_id } => device_id.to_string(),
                    _ => String::new(),
                }
            }
            Sentence::Close => {
                self.send_command(VIRTUAL_DEVICE_ID, Command::Close)?;
                String::new()
            }
            Sentence::Stop => {
                self.device.stop();
                String::new()
            }
            Sentence::SetTimeFormat(format) => {
                self.device.set_time_format(format);
                String::new()
            }
            Sentence::Play { from, to } => {
                self.device.play(Some(from), to);
                String::new()
            }
            Sentence::Status(query) => self.status_text(query),
            Sentence::Unknown => String::new(),
        };

        Ok(reply)
    }

    fn status_text(&self, query: StatusQuery) -> String {
        let d = &self.device;
        match query {
            StatusQuery::NumberOfTracks => d.status(StatusItem::NumberOfTracks, None).to_string(),
            StatusQuery::CurrentTrack => d.status(StatusItem::CurrentTrack, None).to_string(),
            StatusQuery::Length(track) => d.status(StatusItem::Length, track).to_string(),
            StatusQuery::Position(track) => {
                d.status(StatusItem::Position, Some(track)).to_string()
            }
            StatusQuery::Mode => match d.status(StatusItem::Mode, None) {
                MODE_PLAY => "playing".to_string(),
                _ => "stopped".to_string(),
            },
            StatusQuery::MediaPresent => bool_text(d.status(StatusItem::MediaPresent, None)),
            StatusQuery::Ready => bool_text(d.status(StatusItem::Ready, None)),
            StatusQuery::TimeFormat => d.state().time_format.name().to_string(),
        }
    }

    pub fn aux_num_devs(&self) -> u32 {
        AUX_DEVICE_COUNT
    }

    pub fn aux_caps(&self) -> AuxCaps {
        AuxCaps::virtual_cd()
    }

    /// The last volume word set, 0 before the first call.
    pub fn aux_volume(&self) -> u32 {
        self.aux_volume.get()
    }

    /// Set the CD-audio line volume from a packed stereo word. Only the left
    /// channel is used.
    pub fn aux_set_volume(&self, volume: u32) {
        if let Some(percent) = self.aux_volume.set(volume) {
            debug!("aux volume {volume:#010x} -> {percent}%");
            self.device.set_volume(percent);
        }
    }

    fn add_alias(&self, alias: String) {
        let mut aliases = self.lock_aliases();
        if !aliases.contains(&alias) {
            aliases.push(alias);
        }
    }

    fn lock_aliases(&self) -> MutexGuard<'_, Vec<String>> {
        self.aliases
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn bool_text(value: u32) -> String {
    if value != 0 { "true" } else { "false" }.to_string()
}

#[cfg(test)]
mod tests;
