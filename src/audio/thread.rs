use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use super::sink::create_sink;
use super::types::{EngineCmd, PlaybackHandle};

pub(super) fn spawn_audio_thread(
    rx: Receiver<EngineCmd>,
    playback_info: PlaybackHandle,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // The output stream is not `Send`, so it has to be opened on this thread.
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!("no audio output device, CD audio will be silent: {e}");
                None
            }
        };

        let mut sink: Option<Sink> = None;

        fn do_stop(sink: &mut Option<Sink>, playback_info: &PlaybackHandle) {
            if let Some(s) = sink.take() {
                s.stop();
            }
            if let Ok(mut info) = playback_info.lock() {
                info.busy = false;
            }
        }

        fn do_play(
            path: &std::path::Path,
            stream: Option<&OutputStream>,
            sink: &mut Option<Sink>,
            playback_info: &PlaybackHandle,
        ) -> bool {
            do_stop(sink, playback_info);

            let Some(stream) = stream else {
                return false;
            };

            let new_sink = match create_sink(stream, path) {
                Ok(s) => s,
                Err(e) => {
                    warn!("{e}");
                    return false;
                }
            };

            let volume = playback_info.lock().map(|i| i.volume).unwrap_or(1.0);
            new_sink.set_volume(volume);
            new_sink.play();
            *sink = Some(new_sink);

            if let Ok(mut info) = playback_info.lock() {
                info.busy = true;
            }
            true
        }

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    EngineCmd::Play { path, reply } => {
                        let ok = do_play(&path, stream.as_ref(), &mut sink, &playback_info);
                        debug!("play {path:?} -> {ok}");
                        // The requester may have given up waiting; nothing to do then.
                        let _ = reply.send(ok);
                    }

                    EngineCmd::Stop => do_stop(&mut sink, &playback_info),

                    EngineCmd::SetVolume(volume) => {
                        if let Some(ref s) = sink {
                            s.set_volume(volume);
                        }
                        if let Ok(mut info) = playback_info.lock() {
                            info.volume = volume;
                        }
                    }

                    EngineCmd::Quit => {
                        do_stop(&mut sink, &playback_info);
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // periodic check for the end of the current track
                    if sink.as_ref().is_some_and(Sink::empty) {
                        debug!("track finished");
                        do_stop(&mut sink, &playback_info);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    do_stop(&mut sink, &playback_info);
                    break;
                }
            }
        }
    })
}
