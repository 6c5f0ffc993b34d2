// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for the Teamboard server.
//!
//! Uses clap's derive API. Every flag is optional and overrides the value
//! loaded from the configuration file and `TEAMBOARD_` environment.

use std::path::PathBuf;

use clap::Parser;
use teamboard_core::AppConfig;
use tracing::debug;

/// Teamboard - a web board of the GitHub issues assigned to your team.
///
/// Fetches the open issues assigned to each user of a roster in one
/// repository and serves them as a single page. Append `?refresh=1` to the
/// page URL to re-fetch.
#[derive(Debug, Parser)]
#[command(name = "teamboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Repository to track, as owner/name
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Bind on this address and port
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Load issues from the cache file on startup and keep it updated
    #[arg(long)]
    pub use_cache: bool,

    /// Location of the cache file
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// User whose assigned issues are shown (repeatable, replaces the roster)
    #[arg(long = "user", value_name = "LOGIN")]
    pub users: Vec<String>,
}

impl Cli {
    /// Applies command-line overrides to `config`.
    ///
    /// `hosted_bind` is the address derived from `HOST` and `PORT` (see
    /// [`hosted_bind_addr`]); it wins over the configured bind address but
    /// loses to `--bind`.
    pub fn apply_overrides(&self, config: &mut AppConfig, hosted_bind: Option<String>) {
        if let Some(bind) = hosted_bind {
            debug!("Using bind address from HOST and PORT: {bind}");
            config.server.bind = bind;
        }

        if let Some(repo) = &self.repo {
            config.board.repo.clone_from(repo);
            debug!("Overriding repository to: {repo}");
        }

        if let Some(bind) = &self.bind {
            config.server.bind.clone_from(bind);
            debug!("Overriding bind address to: {bind}");
        }

        if self.use_cache {
            config.cache.enabled = true;
        }

        if let Some(path) = &self.cache_file {
            config.cache.file.clone_from(path);
            debug!("Overriding cache file to: {}", path.display());
        }

        if !self.users.is_empty() {
            config.board.users.clone_from(&self.users);
            debug!("Overriding roster with {} users", self.users.len());
        }
    }
}

/// Bind address for hosting platforms that hand out `HOST` and `PORT`.
///
/// Returns `None` unless both variables are set and non-empty.
#[must_use]
pub fn hosted_bind_addr() -> Option<String> {
    let host = std::env::var("HOST").ok().filter(|h| !h.is_empty())?;
    let port = std::env::var("PORT").ok().filter(|p| !p.is_empty())?;
    Some(format!("{host}:{port}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("teamboard").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_leave_config_untouched() {
        let mut config = AppConfig::default();
        parse(&[]).apply_overrides(&mut config, None);

        assert_eq!(config.board.repo, "openshift/origin");
        assert_eq!(config.server.bind, "localhost:8666");
        assert!(!config.cache.enabled);
        assert_eq!(config.board.users.len(), 11);
    }

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        parse(&[
            "--repo",
            "rust-lang/cargo",
            "--bind",
            "0.0.0.0:9000",
            "--use-cache",
            "--cache-file",
            "/tmp/board.json",
            "--user",
            "alice",
            "--user",
            "bob",
        ])
        .apply_overrides(&mut config, None);

        assert_eq!(config.board.repo, "rust-lang/cargo");
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert!(config.cache.enabled);
        assert_eq!(config.cache.file, PathBuf::from("/tmp/board.json"));
        assert_eq!(config.board.users, vec!["alice", "bob"]);
    }

    #[test]
    fn hosted_bind_overrides_config_but_not_flag() {
        let mut config = AppConfig::default();
        parse(&[]).apply_overrides(&mut config, Some("0.0.0.0:8080".to_string()));
        assert_eq!(config.server.bind, "0.0.0.0:8080");

        let mut config = AppConfig::default();
        parse(&["--bind", "127.0.0.1:1234"])
            .apply_overrides(&mut config, Some("0.0.0.0:8080".to_string()));
        assert_eq!(config.server.bind, "127.0.0.1:1234");
    }

    #[test]
    fn rejects_unknown_flag() {
        let result = Cli::try_parse_from(["teamboard", "--frobnicate"]);
        assert!(result.is_err());
    }

    #[allow(unsafe_code)]
    fn set_host_port(host: Option<&str>, port: Option<&str>) {
        // SAFETY: callers are #[serial]; no other threads access these vars.
        unsafe {
            match host {
                Some(h) => std::env::set_var("HOST", h),
                None => std::env::remove_var("HOST"),
            }
            match port {
                Some(p) => std::env::set_var("PORT", p),
                None => std::env::remove_var("PORT"),
            }
        }
    }

    #[test]
    #[serial]
    fn hosted_bind_requires_both_vars() {
        set_host_port(Some("0.0.0.0"), None);
        assert_eq!(hosted_bind_addr(), None);

        set_host_port(None, Some("8080"));
        assert_eq!(hosted_bind_addr(), None);

        set_host_port(Some("0.0.0.0"), Some("8080"));
        assert_eq!(hosted_bind_addr().as_deref(), Some("0.0.0.0:8080"));

        set_host_port(None, None);
    }
}
