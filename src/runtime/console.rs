use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::audio::PlaybackEngine;
use crate::mci::Mci;

const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

/// Feed command sentences from `input` to the drive, one per line, writing
/// non-empty replies and errors to `out`. Closes the device on `quit` or EOF.
pub fn run_console<E, R, W>(mci: &Mci<E>, input: R, mut out: W) -> io::Result<()>
where
    E: PlaybackEngine,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let sentence = line.trim();
        if sentence.is_empty() {
            continue;
        }
        if QUIT_WORDS.contains(&sentence) {
            debug!("console quit");
            break;
        }

        match mci.send_string(sentence) {
            Ok(reply) if reply.is_empty() => {}
            Ok(reply) => writeln!(out, "{reply}")?,
            Err(e) => writeln!(out, "error {}: {e}", e.code())?,
        }
        out.flush()?;
    }

    mci.device().close();
    Ok(())
}
