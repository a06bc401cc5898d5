//! Free-text command sentences such as `play cd from 2 to 5`.
//!
//! Sentences are split on whitespace and matched against a fixed table of
//! shapes. Matching is case-sensitive. Anything outside the table parses to
//! [`Sentence::Unknown`], which the facade answers with an empty reply.

use crate::error::MciError;
use crate::transport::{CD_AUDIO_DEVICE_NAME, TimeFormat};

/// Short device name accepted next to `cdaudio`.
pub const CD_SHORT_NAME: &str = "cd";

/// Notification flags a caller may append; they carry no meaning here.
const IGNORED_FLAGS: [&str; 2] = ["wait", "notify"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusQuery {
    NumberOfTracks,
    Mode,
    CurrentTrack,
    MediaPresent,
    Ready,
    TimeFormat,
    Length(Option<u32>),
    Position(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentence {
    SysInfo,
    Open { alias: Option<String> },
    Close,
    Stop,
    SetTimeFormat(TimeFormat),
    Status(StatusQuery),
    Play { from: u32, to: Option<u32> },
    Unknown,
}

/// Parse one sentence. `aliases` are extra device names registered by
/// `open cdaudio alias NAME`.
///
/// Only a numeric time format outside the legacy table is an error.
pub fn parse_sentence(input: &str, aliases: &[String]) -> Result<Sentence, MciError> {
    let tokens: Vec<&str> = input
        .split_whitespace()
        .filter(|t| !IGNORED_FLAGS.contains(t))
        .collect();

    let is_device = |name: &str| {
        name == CD_SHORT_NAME || name == CD_AUDIO_DEVICE_NAME || aliases.iter().any(|a| a == name)
    };

    let sentence = match tokens.as_slice() {
        ["sysinfo", ..] => Sentence::SysInfo,
        ["open", dev] if *dev == CD_AUDIO_DEVICE_NAME => Sentence::Open { alias: None },
        ["open", dev, "alias", alias] if *dev == CD_AUDIO_DEVICE_NAME => Sentence::Open {
            alias: Some((*alias).to_string()),
        },
        [verb, dev, rest @ ..] if is_device(dev) => match (*verb, rest) {
            ("close", []) => Sentence::Close,
            ("stop", []) => Sentence::Stop,
            ("set", ["time", "format", format]) => match parse_time_format(format)? {
                Some(f) => Sentence::SetTimeFormat(f),
                None => Sentence::Unknown,
            },
            ("status", query) => parse_status(query).map_or(Sentence::Unknown, Sentence::Status),
            ("play", ["from", from]) => match from.parse() {
                Ok(from) => Sentence::Play { from, to: None },
                Err(_) => Sentence::Unknown,
            },
            ("play", ["from", from, "to", to]) => match (from.parse(), to.parse()) {
                (Ok(from), Ok(to)) => Sentence::Play { from, to: Some(to) },
                _ => Sentence::Unknown,
            },
            _ => Sentence::Unknown,
        },
        _ => Sentence::Unknown,
    };

    Ok(sentence)
}

fn parse_time_format(word: &str) -> Result<Option<TimeFormat>, MciError> {
    Ok(match word {
        "tmsf" => Some(TimeFormat::Tmsf),
        "msf" => Some(TimeFormat::Msf),
        "milliseconds" | "ms" => Some(TimeFormat::Milliseconds),
        other => match other.parse::<u32>() {
            Ok(raw) => Some(TimeFormat::try_from(raw)?),
            Err(_) => None,
        },
    })
}

fn parse_status(query: &[&str]) -> Option<StatusQuery> {
    Some(match query {
        ["number", "of", "tracks"] => StatusQuery::NumberOfTracks,
        ["mode"] => StatusQuery::Mode,
        ["current", "track"] => StatusQuery::CurrentTrack,
        ["media", "present"] => StatusQuery::MediaPresent,
        ["ready"] => StatusQuery::Ready,
        ["time", "format"] => StatusQuery::TimeFormat,
        ["length"] => StatusQuery::Length(None),
        ["length", "track", n] => StatusQuery::Length(Some(n.parse().ok()?)),
        ["position", "track", n] => StatusQuery::Position(n.parse().ok()?),
        _ => return None,
    })
}
