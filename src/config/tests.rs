use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
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
fn resolve_config_path_prefers_stillpoint_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("STILLPOINT_CONFIG_PATH", "/tmp/stillpoint-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/stillpoint-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("stillpoint")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("stillpoint")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_bundled_app() {
    let s = Settings::default();
    assert_eq!(s.session.durations, vec![15, 30, 45, 60]);
    assert_eq!(s.session.default_duration, 15);
    assert_eq!(s.session.tick_ms, 1000);
    assert_eq!(s.audio.extension, "mp3");
    assert_eq!(s.ui.header_text, "For a better YOU!");
    assert!(s.log.file.is_none());
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
assets_dir = "/opt/sounds"
extension = "ogg"
volume = 0.5

[session]
durations = [5, 10, 20]
default_duration = 10
tick_ms = 250

[ui]
header_text = "breathe"
pulse = false

[log]
filter = "stillpoint=debug"
file = "/tmp/stillpoint.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("STILLPOINT_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("STILLPOINT__AUDIO__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.assets_dir, std::path::PathBuf::from("/opt/sounds"));
    assert_eq!(s.audio.extension, "ogg");
    assert_eq!(s.audio.volume, 0.5);
    assert_eq!(s.session.durations, vec![5, 10, 20]);
    assert_eq!(s.session.default_duration, 10);
    assert_eq!(s.session.tick_ms, 250);
    assert_eq!(s.ui.header_text, "breathe");
    assert!(!s.ui.pulse);
    assert_eq!(s.log.filter, "stillpoint=debug");
    assert_eq!(s.log.file, Some(std::path::PathBuf::from("/tmp/stillpoint.log")));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
extension = "mp3"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("STILLPOINT_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("STILLPOINT__AUDIO__EXTENSION", "flac");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.extension, "flac");
    assert_eq!(s.session.durations, vec![15, 30, 45, 60]);
}

#[test]
fn settings_env_overrides_duration_list() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "").unwrap();

    let _g1 = EnvGuard::set("STILLPOINT_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("STILLPOINT__SESSION__DURATIONS", "5,10");
    let _g3 = EnvGuard::set("STILLPOINT__SESSION__DEFAULT_DURATION", "5");

    let s = Settings::load().unwrap();
    assert_eq!(s.session.durations, vec![5, 10]);
    assert_eq!(s.session.default_duration, 5);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_broken_session_settings() {
    let mut s = Settings::default();
    s.session.durations.clear();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.session.durations = vec![0, 15];
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.session.default_duration = 20;
    assert!(s.validate().unwrap_err().contains("default_duration"));

    let mut s = Settings::default();
    s.session.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume = 3.0;
    assert!(s.validate().is_err());
}
