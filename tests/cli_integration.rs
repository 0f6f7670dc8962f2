//! CLI integration tests.
//!
//! These tests verify the CLI argument parsing and configuration loading.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use bsky_session::cli::{parse_args_from, Args, Command, SessionSource};
use bsky_session::config::{Config, ConfigError};

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("bsky-session")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_defaults() {
    let result = parse_args_from(args(&[])).unwrap();

    assert!(result.command.is_none());
    assert!(result.config.is_none());
    assert!(result.service.is_none());
    assert!(result.data_dir.is_none());
    assert!(result.log_level.is_none());
}

#[test]
fn test_cli_full_options() {
    let result = parse_args_from(args(&[
        "-c",
        "/etc/bsky-session.json",
        "-s",
        "https://pds.example",
        "-d",
        "/var/lib/bsky",
        "-l",
        "debug",
        "login",
        "session.json",
    ]))
    .unwrap();

    assert_eq!(result.config, Some(PathBuf::from("/etc/bsky-session.json")));
    assert_eq!(result.service.as_deref(), Some("https://pds.example"));
    assert_eq!(result.data_dir, Some(PathBuf::from("/var/lib/bsky")));
    assert_eq!(result.log_level.as_deref(), Some("debug"));
    assert_eq!(
        result.command,
        Some(Command::Login(SessionSource::File(PathBuf::from(
            "session.json"
        ))))
    );
}

#[test]
fn test_cli_options_after_command() {
    let result = parse_args_from(args(&["status", "--service", "http://localhost:2583"])).unwrap();

    assert_eq!(result.command, Some(Command::Status));
    assert_eq!(result.service.as_deref(), Some("http://localhost:2583"));
}

#[test]
fn test_cli_unknown_command() {
    assert!(parse_args_from(args(&["whoami"])).is_err());
}

// ============================================================================
// Configuration Loading Tests
// ============================================================================

#[test]
fn test_config_from_json_file() {
    let json = r#"{
        "service": {
            "url": "https://pds.example"
        },
        "storage": {
            "dir": "/srv/sessions",
            "key": "work-account"
        },
        "logging": {
            "level": "debug"
        }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.service.url, "https://pds.example");
    assert_eq!(config.data_dir(), PathBuf::from("/srv/sessions"));
    assert_eq!(config.storage.key, "work-account");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_config_priority_cli_over_file() {
    let json = r#"{
        "service": { "url": "https://from-file.example" },
        "storage": { "dir": "/from/file" }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let args = Args {
        config: Some(file.path().to_path_buf()),
        service: Some("https://from-cli.example".to_string()),
        data_dir: Some(PathBuf::from("/from/cli")),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();

    assert_eq!(config.service.url, "https://from-cli.example");
    assert_eq!(config.data_dir(), PathBuf::from("/from/cli"));
}

#[test]
fn test_config_load_rejects_bad_service() {
    let args = Args {
        service: Some("bsky.social".to_string()),
        ..Args::default()
    };

    let err = Config::load(&args).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidService(_)));
    assert!(err.to_string().contains("bsky.social"));
}

#[test]
fn test_config_missing_file() {
    let args = Args {
        config: Some(PathBuf::from("/definitely/not/here.json")),
        ..Args::default()
    };

    assert!(matches!(Config::load(&args), Err(ConfigError::Io(_))));
}

// ============================================================================
// Configuration Serialization Tests
// ============================================================================

#[test]
fn test_config_roundtrip() {
    let original = Config::default();
    let json = serde_json::to_string(&original).unwrap();
    let loaded: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(original.service.url, loaded.service.url);
    assert_eq!(original.storage.key, loaded.storage.key);
}

#[test]
fn test_config_partial_deserialization() {
    let json = r#"{"storage": {"key": "other"}}"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.storage.key, "other");
    assert_eq!(config.service.url, "https://bsky.social"); // Default
    assert!(config.storage.dir.is_none()); // Default
}
