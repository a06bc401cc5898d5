//! Opening and decoding a track into a paused `rodio` sink.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink};

#[derive(Debug, thiserror::Error)]
pub(super) enum SinkError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecoderError,
    },
}

/// Create a paused `Sink` holding the decoded contents of `path`.
pub(super) fn create_sink(handle: &OutputStream, path: &Path) -> Result<Sink, SinkError> {
    let file = File::open(path).map_err(|source| SinkError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|source| SinkError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
