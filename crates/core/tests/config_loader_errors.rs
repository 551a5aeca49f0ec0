use memov2_core::config::loader::{ConfigError, ConfigLoader};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn malformed_toml_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(&cfg_path, "base_dir = [not toml");

    let err = ConfigLoader::load_or_init(Some(&cfg_path)).unwrap_err();
    match err {
        ConfigError::ParseError(..) => {}
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn non_positive_days_to_seek_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");

    for days in [0, -2] {
        let toml = format!(
            "base_dir = \"{}\"\ntodos_daystoseek = {days}\n",
            tmp.path().join("data").display()
        );
        write_file(&cfg_path, &toml);

        let err = ConfigLoader::load_or_init(Some(&cfg_path)).unwrap_err();
        match err {
            ConfigError::InvalidDaysToSeek(d) => assert_eq!(d, days),
            other => panic!("expected InvalidDaysToSeek, got {other:?}"),
        }
    }
}

#[test]
fn error_messages_name_the_file() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(&cfg_path, "base_dir = 1\n");

    let err = ConfigLoader::load_or_init(Some(&cfg_path)).unwrap_err();
    assert!(err.to_string().contains("config.toml"));
}
