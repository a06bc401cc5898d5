//! The auxiliary CD-audio mixer line that legacy programs query for volume.

use std::sync::Mutex;

pub const AUX_MANUFACTURER_ID: u16 = 2;
pub const AUX_PRODUCT_ID: u16 = 401;
pub const AUX_DRIVER_VERSION: u32 = 1;
pub const AUX_DEVICE_NAME: &str = "vcdaudio virtual CD";
/// Technology id of a CD-audio line.
pub const AUXCAPS_CDAUDIO: u16 = 1;
/// Support flag: the line has a volume control.
pub const AUXCAPS_VOLUME: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxCaps {
    pub manufacturer_id: u16,
    pub product_id: u16,
    pub driver_version: u32,
    pub name: String,
    pub technology: u16,
    pub support: u32,
}

impl AuxCaps {
    pub fn virtual_cd() -> Self {
        Self {
            manufacturer_id: AUX_MANUFACTURER_ID,
            product_id: AUX_PRODUCT_ID,
            driver_version: AUX_DRIVER_VERSION,
            name: AUX_DEVICE_NAME.to_string(),
            technology: AUXCAPS_CDAUDIO,
            support: AUXCAPS_VOLUME,
        }
    }
}

/// Left-channel level of a packed stereo volume word, as a percentage.
pub fn volume_percent(volume: u32) -> u8 {
    let left = volume & 0xFFFF;
    // left <= 0xFFFF, so the result is at most 100
    (left * 100 / 0xFFFF) as u8
}

/// Last volume word written to the aux line.
#[derive(Debug, Default)]
pub(crate) struct AuxVolume {
    last: Mutex<Option<u32>>,
}

impl AuxVolume {
    pub(crate) fn get(&self) -> u32 {
        (*self.lock()).unwrap_or(0)
    }

    /// Store `volume` and return its percentage, or `None` when it equals
    /// the previous word.
    pub(crate) fn set(&self, volume: u32) -> Option<u8> {
        let mut last = self.lock();
        if *last == Some(volume) {
            return None;
        }
        *last = Some(volume);
        Some(volume_percent(volume))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<u32>> {
        self.last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
