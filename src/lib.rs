//! A virtual CD-audio drive.
//!
//! Legacy programs that drive a CD through the MCI command surface get their
//! "CD audio" from numbered audio files in a music directory instead.

pub mod audio;
pub mod config;
pub mod error;
pub mod library;
pub mod mci;
pub mod runtime;
pub mod transport;
