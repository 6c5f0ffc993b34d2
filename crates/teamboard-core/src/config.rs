// SPDX-License-Identifier: Apache-2.0

//! Configuration management for Teamboard.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `TEAMBOARD_`)
//! 2. Config file: `~/.config/teamboard/config.toml`
//! 3. Built-in defaults
//!
//! Command-line overrides are applied on top by the server binary.
//!
//! # Examples
//!
//! ```bash
//! # Track a different repository via environment variable
//! TEAMBOARD_BOARD__REPO=rust-lang/cargo cargo run
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::BoardError;

/// Users tracked when no roster is configured.
pub const DEFAULT_USERS: &[&str] = &[
    "soltysh",
    "mfojtik",
    "bparees",
    "jhadvig",
    "kargakis",
    "mnagy",
    "csrwng",
    "jcantrill",
    "rhcarvalho",
    "gabemontero",
    "ewolinetz",
];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Repository and roster.
    pub board: BoardConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// On-disk cache settings.
    pub cache: CacheConfig,
    /// GitHub API settings.
    pub github: GitHubConfig,
}

/// Repository and roster settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Repository in `owner/name` form.
    pub repo: String,
    /// Logins whose assigned issues are aggregated.
    pub users: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            repo: "openshift/origin".to_string(),
            users: DEFAULT_USERS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl BoardConfig {
    /// Returns the roster with whitespace trimmed, blanks dropped and
    /// duplicates removed, keeping first-occurrence order.
    #[must_use]
    pub fn roster(&self) -> Vec<String> {
        normalize_roster(&self.users)
    }
}

/// HTTP server settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address and port to bind.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "localhost:8666".to_string(),
        }
    }
}

/// Cache settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Read the cache on startup and write it after each fetch.
    pub enabled: bool,
    /// Location of the cache file.
    pub file: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file: PathBuf::from("issues-cache.json"),
        }
    }
}

/// GitHub API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API. `None` uses api.github.com.
    pub api_url: Option<String>,
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_timeout_seconds: 10,
        }
    }
}

/// Trims, drops empty entries and deduplicates a list of logins.
#[must_use]
pub fn normalize_roster<S: AsRef<str>>(users: &[S]) -> Vec<String> {
    let mut roster: Vec<String> = Vec::with_capacity(users.len());
    for user in users {
        let user = user.as_ref().trim();
        if !user.is_empty() && !roster.iter().any(|u| u == user) {
            roster.push(user.to_string());
        }
    }
    roster
}

/// Returns the Teamboard configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/teamboard`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("teamboard");
    }
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("teamboard")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration from the default config file location.
///
/// # Errors
///
/// Returns `BoardError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, BoardError> {
    load_config_from(&config_file_path())
}

/// Load application configuration from `path` and the environment.
///
/// The file is optional. Environment variables use the prefix `TEAMBOARD_`
/// and double underscore for nested keys (e.g., `TEAMBOARD_SERVER__BIND`).
/// `TEAMBOARD_BOARD__USERS` accepts a comma-separated list.
///
/// # Errors
///
/// Returns `BoardError::Config` if the config file exists but is invalid.
pub fn load_config_from(path: &Path) -> Result<AppConfig, BoardError> {
    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::from(path).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("TEAMBOARD")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("board.users")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn from_toml(source: &str) -> AppConfig {
        Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .expect("should build config")
            .try_deserialize()
            .expect("should deserialize")
    }

    #[test]
    #[serial]
    fn test_load_config_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("missing.toml"))
            .expect("should load with defaults");

        assert_eq!(config.board.repo, "openshift/origin");
        assert_eq!(config.board.users.len(), DEFAULT_USERS.len());
        assert_eq!(config.server.bind, "localhost:8666");
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.file, PathBuf::from("issues-cache.json"));
        assert_eq!(config.github.api_timeout_seconds, 10);
        assert!(config.github.api_url.is_none());
    }

    #[test]
    fn test_config_file_path() {
        let path = config_file_path();
        assert!(path.ends_with("teamboard/config.toml"));
    }

    #[test]
    fn test_config_from_toml() {
        let config = from_toml(
            r#"
[board]
repo = "rust-lang/cargo"
users = ["alice", "bob"]

[server]
bind = "0.0.0.0:9000"

[cache]
enabled = true
file = "/tmp/board.json"
"#,
        );

        assert_eq!(config.board.repo, "rust-lang/cargo");
        assert_eq!(config.board.users, vec!["alice", "bob"]);
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert!(config.cache.enabled);
        assert_eq!(config.cache.file, PathBuf::from("/tmp/board.json"));
        // Untouched sections keep their defaults
        assert_eq!(config.github.api_timeout_seconds, 10);
    }

    #[test]
    #[serial]
    #[allow(unsafe_code)]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbind = \"127.0.0.1:1\"\n").unwrap();

        // SAFETY: serialized with the other environment tests.
        unsafe {
            std::env::set_var("TEAMBOARD_SERVER__BIND", "127.0.0.1:2");
            std::env::set_var("TEAMBOARD_BOARD__USERS", "carol,dave");
        }
        let config = load_config_from(&path);
        unsafe {
            std::env::remove_var("TEAMBOARD_SERVER__BIND");
            std::env::remove_var("TEAMBOARD_BOARD__USERS");
        }

        let config = config.expect("should load");
        assert_eq!(config.server.bind, "127.0.0.1:2");
        assert_eq!(config.board.users, vec!["carol", "dave"]);
    }

    #[test]
    #[serial]
    #[allow(unsafe_code)]
    fn test_env_single_underscore_after_prefix() {
        let dir = tempfile::tempdir().unwrap();

        // SAFETY: serialized with the other environment tests.
        unsafe {
            std::env::set_var("TEAMBOARD_GITHUB__API_TIMEOUT_SECONDS", "3");
            std::env::set_var("TEAMBOARD_CACHE__ENABLED", "true");
        }
        let config = load_config_from(&dir.path().join("missing.toml"));
        unsafe {
            std::env::remove_var("TEAMBOARD_GITHUB__API_TIMEOUT_SECONDS");
            std::env::remove_var("TEAMBOARD_CACHE__ENABLED");
        }

        let config = config.expect("should load");
        assert_eq!(config.github.api_timeout_seconds, 3);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nbind = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, BoardError::Config { .. }));
    }

    #[test]
    fn test_normalize_roster() {
        let roster = normalize_roster(&["alice", " bob ", "", "alice", "ewolinetz "]);
        assert_eq!(roster, vec!["alice", "bob", "ewolinetz"]);
    }

    #[test]
    fn test_default_roster_is_already_normalized() {
        let board = BoardConfig::default();
        assert_eq!(board.roster(), board.users);
    }
}
