//! Configuration management for bsky-session.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::client::DEFAULT_SERVICE;
use crate::storage::SESSION_KEY;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service endpoint configuration.
    pub service: ServiceSection,
    /// Persistence configuration.
    pub storage: StorageSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Service endpoint section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSection {
    /// Base URL of the AT Protocol service.
    pub url: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE.to_string(),
        }
    }
}

/// Persistence section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Directory holding the session file. Resolved from the environment
    /// when unset.
    pub dir: Option<PathBuf>,
    /// Key the session is stored under.
    pub key: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            dir: None,
            key: SESSION_KEY.to_string(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace) or a full filter directive.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BSKY_SESSION_SERVICE").filter(|v| !v.is_empty()) {
            self.service.url = url;
        }

        if let Some(dir) = lookup("BSKY_SESSION_DIR").filter(|v| !v.is_empty()) {
            self.storage.dir = Some(PathBuf::from(dir));
        }

        if let Some(level) = lookup("BSKY_SESSION_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref url) = args.service {
            self.service.url = url.clone();
        }

        if let Some(ref dir) = args.data_dir {
            self.storage.dir = Some(dir.clone());
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        config.apply_env();
        config.apply_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Check that the service URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.service.url)
            .map_err(|_| ConfigError::InvalidService(self.service.url.clone()))?;

        match url.scheme() {
            "http" | "https" if url.has_host() => Ok(()),
            _ => Err(ConfigError::InvalidService(self.service.url.clone())),
        }
    }

    /// Directory the session file lives in.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .dir
            .clone()
            .unwrap_or_else(|| default_data_dir(|name| std::env::var_os(name).map(PathBuf::from)))
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// `$XDG_DATA_HOME/bsky-session`, else `$HOME/.local/share/bsky-session`,
/// else `.bsky-session` in the working directory.
fn default_data_dir<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<PathBuf>,
{
    if let Some(xdg) = lookup("XDG_DATA_HOME").filter(|p| p.is_absolute()) {
        return xdg.join("bsky-session");
    }
    if let Some(home) = lookup("HOME") {
        return home.join(".local").join("share").join("bsky-session");
    }
    PathBuf::from(".bsky-session")
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Service URL is not an absolute http(s) URL.
    InvalidService(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidService(url) => write!(f, "invalid service url: {}", url),
        }
    }
}

impl std::error::Error for ConfigError {}
