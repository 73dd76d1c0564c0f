// Tests for loading and saving the config file

use ffbatch::config::Config;
use ffbatch::engine::Preset;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.encoder.path = Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
    config.defaults.preset = Preset::AudioMp3;
    config.defaults.size_cap_mb = 25;
    config.defaults.interrupt_on_stop = false;
    config.logging.level = "debug".to_string();

    config.save_to(&path).unwrap();
    let loaded = Config::load_from(&path).unwrap();

    assert_eq!(loaded.encoder.path, config.encoder.path);
    assert_eq!(loaded.defaults.preset, Preset::AudioMp3);
    assert_eq!(loaded.defaults.size_cap_mb, 25);
    assert!(!loaded.defaults.interrupt_on_stop);
    assert_eq!(loaded.logging.level, "debug");
}

#[test]
fn test_invalid_toml_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[defaults\nsize_cap_mb = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(
        format!("{:#}", err).contains("Failed to parse config file"),
        "Unexpected error: {:#}",
        err
    );
}

#[test]
fn test_missing_file_is_an_error_for_load_from() {
    let dir = TempDir::new().unwrap();
    assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
}
