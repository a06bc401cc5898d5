use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_vcdaudio_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("VCDAUDIO_CONFIG_PATH", "/tmp/vcdaudio-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/vcdaudio-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("vcdaudio")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("vcdaudio")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
music_dir = "/srv/game/MUSIC"
file_prefix = "track"
extensions = ["flac"]

[audio]
initial_volume = 40
poll_interval_ms = 10

[logging]
filter = "vcdaudio=debug"
file = "/tmp/vcdaudio.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VCDAUDIO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("VCDAUDIO__AUDIO__POLL_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.music_dir, PathBuf::from("/srv/game/MUSIC"));
    assert_eq!(s.library.file_prefix, "track");
    assert_eq!(s.library.extensions, vec!["flac".to_string()]);
    assert_eq!(s.audio.initial_volume, 40);
    assert_eq!(s.audio.poll_interval_ms, 10);
    assert_eq!(s.logging.filter, "vcdaudio=debug");
    assert_eq!(s.logging.file, Some(PathBuf::from("/tmp/vcdaudio.log")));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_missing_sections_fall_back_to_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "[audio]\ninitial_volume = 70\n").unwrap();

    let _g1 = EnvGuard::set("VCDAUDIO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("VCDAUDIO__AUDIO__POLL_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 70);
    assert_eq!(s.audio.poll_interval_ms, 25);
    assert_eq!(s.library.file_prefix, "Track");
    assert_eq!(s.library.music_dir, PathBuf::from("MUSIC"));
    assert!(s.logging.file.is_none());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "[audio]\npoll_interval_ms = 50\n").unwrap();

    let _g1 = EnvGuard::set("VCDAUDIO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("VCDAUDIO__AUDIO__POLL_INTERVAL_MS", "5");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.poll_interval_ms, 5);
}

#[test]
fn validate_rejects_zero_poll_interval_and_loud_volume() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.audio.poll_interval_ms = 0;
    assert!(s.validate().is_err());

    s.audio.poll_interval_ms = 25;
    s.audio.initial_volume = 101;
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_blank_extension_list() {
    let mut s = Settings::default();
    s.library.extensions = vec![" ".into(), ".".into()];
    assert!(s.validate().is_err());
}
