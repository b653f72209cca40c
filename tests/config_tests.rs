//! Configuration loading tests

use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use vaporzone::config::{load_config_from_path, Config};
use vaporzone::error::Error;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.api.base_url, "http://127.0.0.1:8000/api");
    assert_eq!(config.api.timeout(), Duration::from_secs(10));
    assert_eq!(config.routes.login, "/login");
    assert_eq!(config.routes.home, "/home");
    assert!(config
        .session
        .store_path
        .ends_with(std::path::Path::new(".vaporzone").join("session.json")));
}

#[test]
fn test_missing_session_section_uses_home_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vaporzone.toml");
    fs::write(&path, "[api]
timeout_secs = 5
").unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(
        config.session.store_path,
        Config::default().session.store_path
    );
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vaporzone.toml");
    fs::write(&path, "[api]\nbase_url = \"https://tienda.example.com/api\"\n").unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.api.base_url, "https://tienda.example.com/api");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.routes.login, "/login");
}

#[test]
fn test_interpolated_store_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vaporzone.toml");
    fs::write(
        &path,
        "[session]\nstore_path = \"${VAPORZONE_UNSET_DIR:-/tmp/vz}/session.json\"\n",
    )
    .unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(
        config.session.store_path,
        std::path::PathBuf::from("/tmp/vz/session.json")
    );
}

#[test]
fn test_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vaporzone.toml");
    fs::write(&path, "this is [ not valid toml").unwrap();

    let result = load_config_from_path(&path);
    assert!(matches!(result, Err(Error::TomlParse(_))));
}

#[test]
fn test_config_roundtrips_through_toml() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed.api.base_url, config.api.base_url);
    assert_eq!(parsed.session.store_path, config.session.store_path);
}
