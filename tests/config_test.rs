//! Integration tests for config file discovery.
//!
//! These change the process working directory, so they run serially.

use imagestore::config::{load_config_or_default, persist::write_default_config, Config};
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};

/// Runs `f` with the working directory and HOME pointed at `dir`.
fn in_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let previous_dir = std::env::current_dir().unwrap();
    let previous_home = std::env::var_os("HOME");

    std::env::set_current_dir(dir).unwrap();
    std::env::set_var("HOME", dir);
    let result = f();

    std::env::set_current_dir(previous_dir).unwrap();
    match previous_home {
        Some(home) => std::env::set_var("HOME", home),
        None => std::env::remove_var("HOME"),
    }
    result
}

#[test]
#[serial]
fn defaults_when_no_config_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let config = in_dir(dir.path(), || load_config_or_default(None)).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn picks_up_imagestore_toml_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("imagestore.toml"),
        "[database]\npath = \"local.db\"\n",
    )
    .unwrap();

    let config = in_dir(dir.path(), || load_config_or_default(None)).unwrap();
    assert_eq!(config.database.path, PathBuf::from("local.db"));
}

#[test]
#[serial]
fn imagestore_toml_wins_over_config_toml() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("imagestore.toml"),
        "[thumbnails]\ndimension = 10\n",
    )
    .unwrap();
    fs::write(dir.path().join("config.toml"), "[thumbnails]\ndimension = 20\n").unwrap();

    let config = in_dir(dir.path(), || load_config_or_default(None)).unwrap();
    assert_eq!(config.thumbnails.dimension, 10);
}

#[test]
#[serial]
fn falls_back_to_home_config_directory() {
    let dir = tempfile::tempdir().unwrap();
    let home_config = dir.path().join(".config/imagestore");
    fs::create_dir_all(&home_config).unwrap();
    fs::write(
        home_config.join("config.toml"),
        "[thumbnails]\ncreate_by_default = true\n",
    )
    .unwrap();

    let config = in_dir(dir.path(), || load_config_or_default(None)).unwrap();
    assert!(config.thumbnails.create_by_default);
}

#[test]
#[serial]
fn invalid_default_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "[database]\npool_size = 0\n").unwrap();

    let result = in_dir(dir.path(), || load_config_or_default(None));
    assert!(result.is_err());
}

#[test]
fn explicit_path_is_used_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("written.toml");
    write_default_config(&path).unwrap();

    let config = load_config_or_default(Some(&path)).unwrap();
    assert_eq!(config, Config::default());
}
