//! Errors reported back through the command surface.

/// Base of the legacy MCI error numbering.
pub const MCIERR_BASE: u32 = 256;
pub const MCIERR_UNRECOGNIZED_COMMAND: u32 = MCIERR_BASE + 5;
pub const MCIERR_BAD_TIME_FORMAT: u32 = MCIERR_BASE + 37;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MciError {
    /// The device id or message is not something the virtual drive models.
    /// Callers are expected to forward the request to the real subsystem.
    #[error("unrecognized command")]
    UnrecognizedCommand,

    /// A numeric time format outside the legacy table.
    #[error("unsupported time format {0}")]
    UnsupportedTimeFormat(u32),
}

impl MciError {
    /// Numeric result code a legacy caller expects.
    pub fn code(&self) -> u32 {
        match self {
            MciError::UnrecognizedCommand => MCIERR_UNRECOGNIZED_COMMAND,
            MciError::UnsupportedTimeFormat(_) => MCIERR_BAD_TIME_FORMAT,
        }
    }
}

/// Collapse a command outcome into the legacy result code (0 = success).
pub fn result_code<T>(result: &Result<T, MciError>) -> u32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.code(),
    }
}
