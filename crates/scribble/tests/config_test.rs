//! Tests for loading the TOML settings file.

use rand::Rng;
use scribble::AppConfig;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config(
        r#"
seed = 17

[confetti]
count = 12
"#,
    );
    let config = AppConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.seed(), Some(17));
    assert_eq!(config.confetti().count, 12);
    assert_eq!(config.confetti().gravity, 0.15);
    assert_eq!(config.animation().x_steps, 10);
    assert_eq!(config.log_file(), &PathBuf::from("scribble.log"));
}

#[test]
fn test_cli_overrides_file() {
    let file = write_config("seed = 1\nlog_file = \"game.log\"\n");
    let config = AppConfig::from_file(file.path())
        .unwrap()
        .with_overrides(Some(2), Some(PathBuf::from("other.log")));
    assert_eq!(*config.seed(), Some(2));
    assert_eq!(config.log_file(), &PathBuf::from("other.log"));

    let kept = AppConfig::from_file(file.path()).unwrap().with_overrides(None, None);
    assert_eq!(*kept.seed(), Some(1));
    assert_eq!(kept.log_file(), &PathBuf::from("game.log"));
}

#[test]
fn test_invalid_values_rejected() {
    let file = write_config("[animation]\nx_steps = 0\n");
    let err = AppConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("animation.x_steps"), "{}", err);
}

#[test]
fn test_malformed_toml_reports_parse_error() {
    let file = write_config("seed = [");
    let err = AppConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
    assert!(err.file.ends_with("config.rs"));
}

#[test]
fn test_missing_file_reports_read_error() {
    let err = AppConfig::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_seed_makes_rng_repeatable() {
    let config = AppConfig::default().with_overrides(Some(99), None);
    let a: u64 = config.rng().random();
    let b: u64 = config.rng().random();
    assert_eq!(a, b);
    assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
}
