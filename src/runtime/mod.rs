use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::audio::{AudioPlayer, PlaybackEngine};
use crate::library::{Catalog, scan};
use crate::mci::Mci;
use crate::transport::Device;

mod console;
mod logging;
mod settings;

pub use console::run_console;
pub use logging::init_logging;
pub use settings::load_settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();
    let _log_guard = logging::init_logging(&settings.logging)?;
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }

    let dir = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.library.music_dir.clone());
    info!("Reading tracks from {}", dir.display());

    let engine = Arc::new(AudioPlayer::new(&settings.audio));
    let catalog = Catalog::build(scan(&dir, &settings.library), |p| engine.length(p));
    let device = Device::new(
        catalog,
        engine,
        Duration::from_millis(settings.audio.poll_interval_ms),
    );
    let mci = Mci::new(device);

    run_console(&mci, io::stdin().lock(), io::stdout())?;
    Ok(())
}
