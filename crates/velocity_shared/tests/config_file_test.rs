//! # Config File Loading Tests
//!
//! Exercises `GameConfig::load` against real files on disk.

use std::io::Write;

use velocity_shared::{ConfigError, GameConfig, Genre};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = GameConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn file_on_disk_is_parsed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[gameplay]\ngenre = \"cyberpunk\"\nseed = 7\n\n[simulation]\ntick_rate = 30\n"
    )
    .unwrap();

    let config = GameConfig::load(file.path()).unwrap();
    assert_eq!(config.gameplay.genre, Genre::Cyberpunk);
    assert_eq!(config.gameplay.seed, 7);
    assert!((config.fixed_dt() - 1.0 / 30.0).abs() < f64::EPSILON);
}

#[test]
fn directory_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
