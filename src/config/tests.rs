use std::time::Duration;

use super::*;

#[test]
fn test_defaults_describe_current_release() {
    let config = Config::default();
    assert_eq!(config.package.version, "1.0.3");
    assert_eq!(config.package.app, "MaxLaunchpad.app");
    assert_eq!(config.package.minimum_macos, MacosVersion::MONTEREY);
    assert_eq!(config.login_item.id, "com.awesomedog.maxlaunchpad");
    assert!(!config.login_item.hidden);
    assert_eq!(config.paths.applications, PathBuf::from("/Applications"));
    assert_eq!(config.download.timeout, Duration::from_secs(300));
}

#[test]
fn test_load_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[package]\nversion = \"1.1.0\"\nminimum_macos = \"ventura\"\n\n[download]\ntimeout = \"30s\"\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.package.version, "1.1.0");
    assert_eq!(config.package.minimum_macos, MacosVersion::new(13, 0, 0));
    assert_eq!(config.package.app, "MaxLaunchpad.app");
    assert_eq!(config.download.timeout, Duration::from_secs(30));
    assert_eq!(config.login_item, LoginItemConfig::default());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.paths.cache = Some(dir.path().join("cache"));
    config.login_item.hidden = true;
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_invalid_toml_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[package\nversion = ").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_get_and_set_values() {
    let mut config = Config::default();
    config.set_value("login_item.hidden", "true").unwrap();
    config.set_value("download.timeout", "2m").unwrap();
    config.set_value("package.minimum_macos", "sonoma").unwrap();
    config.set_value("paths.cache", "/tmp/mlp").unwrap();

    assert_eq!(config.get_value("login_item.hidden").unwrap(), "true");
    assert_eq!(config.get_value("download.timeout").unwrap(), "2m");
    assert_eq!(config.get_value("package.minimum_macos").unwrap(), "sonoma");
    assert_eq!(config.get_value("paths.cache").unwrap(), "/tmp/mlp");

    config.set_value("paths.cache", "").unwrap();
    assert_eq!(config.paths.cache, None);
}

#[test]
fn test_set_rejects_bad_values() {
    let mut config = Config::default();
    assert!(config.set_value("login_item.hidden", "maybe").is_err());
    assert!(config.set_value("package.sha256", "abc").is_err());
    assert!(config.set_value("download.timeout", "soon").is_err());
    assert!(config.set_value("nope.key", "x").is_err());
    assert!(config.get_value("nope.key").is_err());
}

#[test]
fn test_explicit_cache_dir() {
    let mut config = Config::default();
    config.paths.cache = Some(PathBuf::from("/tmp/mlp-cache"));
    assert_eq!(config.cache_dir().unwrap(), PathBuf::from("/tmp/mlp-cache"));
}
