use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::{AuxCaps, Mci, Sentence, StatusQuery, parse_sentence, volume_percent};
use crate::audio::mock::{Call, MockEngine};
use crate::error::{MCIERR_BAD_TIME_FORMAT, MCIERR_UNRECOGNIZED_COMMAND, MciError, result_code};
use crate::library::Catalog;
use crate::transport::{
    Command, Device, DeviceType, PlayRange, Reply, StatusItem, TimeFormat, VIRTUAL_DEVICE_ID,
};

fn mci(lengths: &[u32]) -> Mci<MockEngine> {
    let lens = lengths.to_vec();
    let mut i = 0;
    let catalog = Catalog::build(
        (0..lens.len()).map(|n| PathBuf::from(format!("/disc/Track{n:02}.ogg"))),
        |_: &Path| {
            let len = lens[i];
            i += 1;
            len
        },
    );
    let engine = Arc::new(MockEngine::new());
    Mci::new(Device::new(catalog, engine, Duration::from_millis(1)))
}

fn no_aliases() -> Vec<String> {
    Vec::new()
}

#[test]
fn parses_known_shapes() {
    let a = no_aliases();
    assert_eq!(parse_sentence("sysinfo cdaudio quantity", &a), Ok(Sentence::SysInfo));
    assert_eq!(parse_sentence("stop cd", &a), Ok(Sentence::Stop));
    assert_eq!(parse_sentence("close cdaudio wait", &a), Ok(Sentence::Close));
    assert_eq!(
        parse_sentence("set cdaudio time format ms", &a),
        Ok(Sentence::SetTimeFormat(TimeFormat::Milliseconds))
    );
    assert_eq!(
        parse_sentence("set cd time format msf", &a),
        Ok(Sentence::SetTimeFormat(TimeFormat::Msf))
    );
    assert_eq!(
        parse_sentence("play cd from 2 to 5", &a),
        Ok(Sentence::Play {
            from: 2,
            to: Some(5)
        })
    );
    assert_eq!(
        parse_sentence("  play   cdaudio from 3  ", &a),
        Ok(Sentence::Play { from: 3, to: None })
    );
    assert_eq!(
        parse_sentence("status cd length track 4", &a),
        Ok(Sentence::Status(StatusQuery::Length(Some(4))))
    );
    assert_eq!(
        parse_sentence("status cd position track 2", &a),
        Ok(Sentence::Status(StatusQuery::Position(2)))
    );
    assert_eq!(
        parse_sentence("open cdaudio alias music", &a),
        Ok(Sentence::Open {
            alias: Some("music".into())
        })
    );
}

#[test]
fn unknown_sentences_are_silent() {
    let a = no_aliases();
    for input in [
        "",
        "PLAY cd from 1",
        "play cd from x",
        "play dvd from 1",
        "play cd from 1 to",
        "status cd volume",
        "set cd time format frames",
        "open cd",
        "seek cd to start",
    ] {
        assert_eq!(parse_sentence(input, &a), Ok(Sentence::Unknown), "{input:?}");
    }
}

#[test]
fn numeric_time_formats() {
    let a = no_aliases();
    assert_eq!(
        parse_sentence("set cd time format 0", &a),
        Ok(Sentence::SetTimeFormat(TimeFormat::Milliseconds))
    );
    assert_eq!(
        parse_sentence("set cd time format 42", &a),
        Err(MciError::UnsupportedTimeFormat(42))
    );
}

#[test]
fn aliases_name_the_device() {
    let a = vec!["music".to_string()];
    assert_eq!(parse_sentence("stop music", &a), Ok(Sentence::Stop));
    assert_eq!(parse_sentence("stop music", &no_aliases()), Ok(Sentence::Unknown));
}

#[test]
fn string_surface_end_to_end() {
    let m = mci(&[10, 15, 5]);

    assert_eq!(m.send_string("sysinfo cdaudio quantity").unwrap(), "cd");
    assert_eq!(m.send_string("open cdaudio").unwrap(), "48879");
    assert_eq!(m.send_string("set cdaudio time format milliseconds").unwrap(), "");
    assert_eq!(m.send_string("status cd time format").unwrap(), "milliseconds");
    assert_eq!(m.send_string("status cd number of tracks").unwrap(), "3");
    assert_eq!(m.send_string("status cd mode").unwrap(), "stopped");

    assert_eq!(m.send_string("play cd from 0 to 20000").unwrap(), "");
    assert_eq!(
        m.device().state().play_range,
        PlayRange { first: 0, last: 2 }
    );
    assert_eq!(m.send_string("status cd mode").unwrap(), "playing");
    assert_eq!(m.send_string("status cd length track 1").unwrap(), "15000");
    assert_eq!(m.send_string("status cd position track 2").unwrap(), "25000");
    assert_eq!(m.send_string("status cd media present").unwrap(), "true");
    assert_eq!(m.send_string("status cd ready").unwrap(), "true");

    assert_eq!(m.send_string("stop cd").unwrap(), "");
    assert_eq!(m.send_string("status cd mode").unwrap(), "stopped");
    assert_eq!(m.send_string("close cd").unwrap(), "");
    assert_eq!(m.send_string("eject cd").unwrap(), "");
}

#[test]
fn bad_numeric_format_reports_error_code() {
    let m = mci(&[60]);
    let result = m.send_string("set cd time format 99");
    assert_eq!(result_code(&result), MCIERR_BAD_TIME_FORMAT);
    assert_eq!(m.device().state().time_format, TimeFormat::Tmsf);
}

#[test]
fn open_alias_is_usable_until_close() {
    let m = mci(&[60, 60]);
    assert_eq!(m.send_string("open cdaudio alias music").unwrap(), "48879");
    assert_eq!(m.send_string("set music time format msf").unwrap(), "");
    assert_eq!(m.device().state().time_format, TimeFormat::Msf);

    m.send_string("close music").unwrap();
    assert_eq!(m.send_string("set music time format tmsf").unwrap(), "");
    assert_eq!(m.device().state().time_format, TimeFormat::Msf);
}

#[test]
fn structured_commands_check_device_id() {
    let m = mci(&[60, 60]);
    let status = Command::Status {
        item: StatusItem::NumberOfTracks,
        track: None,
    };

    for id in [VIRTUAL_DEVICE_ID, 0, 0xFFFF_FFFF] {
        assert_eq!(m.send_command(id, status.clone()), Ok(Reply::Value(2)));
    }

    let foreign = m.send_command(1, status);
    assert_eq!(foreign, Err(MciError::UnrecognizedCommand));
    assert_eq!(result_code(&foreign), MCIERR_UNRECOGNIZED_COMMAND);
    assert_eq!(m.send_command(1, Command::Stop), Err(MciError::UnrecognizedCommand));
}

#[test]
fn open_is_answered_for_any_id() {
    let m = mci(&[60]);
    let open = |name: &str| Command::Open {
        device_type: DeviceType::Name(name.to_string()),
        alias: None,
    };

    assert_eq!(
        m.send_command(7, open("cdaudio")),
        Ok(Reply::Opened { device_id: 0xBEEF })
    );
    assert_eq!(
        m.send_command(7, open("waveaudio")),
        Err(MciError::UnrecognizedCommand)
    );
    assert_eq!(result_code(&m.send_command(0xBEEF, Command::Stop)), 0);
}

#[test]
fn aux_device_caps() {
    let m = mci(&[60]);
    assert_eq!(m.aux_num_devs(), 1);

    let caps: AuxCaps = m.aux_caps();
    assert_eq!(caps.manufacturer_id, 2);
    assert_eq!(caps.product_id, 401);
    assert_eq!(caps.driver_version, 1);
    assert_eq!(caps.name, "vcdaudio virtual CD");
    assert_eq!(caps.technology, 1);
    assert_eq!(caps.support, 1);
}

#[test]
fn aux_volume_forwards_left_channel_once() {
    let m = mci(&[60]);
    assert_eq!(m.aux_volume(), 0);

    m.aux_set_volume(0x0000_8000);
    m.aux_set_volume(0x0000_8000);
    m.aux_set_volume(0xFFFF_FFFF);

    assert_eq!(m.aux_volume(), 0xFFFF_FFFF);
    assert_eq!(
        m.device().engine().calls(),
        vec![Call::Volume(50), Call::Volume(100)]
    );
}

#[test]
fn volume_percent_scales_low_word() {
    assert_eq!(volume_percent(0), 0);
    assert_eq!(volume_percent(0xFFFF), 100);
    assert_eq!(volume_percent(0xFFFF_0000), 0);
    assert_eq!(volume_percent(0x0000_7FFF), 49);
}
