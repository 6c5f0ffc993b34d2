// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Teamboard Core
//!
//! Core library for Teamboard: a web board of the open GitHub issues
//! assigned to each member of a team.
//!
//! This crate provides reusable components for:
//! - GitHub API integration (client construction, assigned-issue queries)
//! - Concurrent aggregation of a whole roster with partial-failure reporting
//! - The shared, lock-guarded board with single-flight refresh
//! - A file cache so restarts need not hit the API
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use teamboard_core::{GitHubIssues, IssueBoard, RepoId, TokenProvider, load_config};
//! use teamboard_core::github::auth::create_client;
//! use secrecy::SecretString;
//!
//! struct EnvToken;
//!
//! impl TokenProvider for EnvToken {
//!     fn github_token(&self) -> Option<SecretString> {
//!         std::env::var("GITHUB_TOKEN").ok().map(SecretString::from)
//!     }
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = load_config()?;
//! let repo: RepoId = config.board.repo.parse()?;
//! let source = Arc::new(GitHubIssues::new(create_client(&EnvToken, &config.github)?));
//!
//! let board = IssueBoard::default();
//! let report = board.refresh(source, &repo, &config.board.roster()).await;
//! if let Some(err) = report.error() {
//!     eprintln!("{err}");
//! }
//! for (user, issues) in board.snapshot().iter() {
//!     println!("@{user}: {} issues", issues.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`aggregate`] - Fan-out/fan-in fetch over a roster
//! - [`board`] - Shared board and refresh coordination
//! - [`cache`] - On-disk cache of the board
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`github`] - GitHub API (client, assigned issues)

// ============================================================================
// Authentication
// ============================================================================

pub use auth::TokenProvider;

// ============================================================================
// Error Handling
// ============================================================================

pub use error::BoardError;

/// Convenience Result type for Teamboard operations.
///
/// This is equivalent to `std::result::Result<T, BoardError>`.
pub type Result<T> = std::result::Result<T, BoardError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, BoardConfig, CacheConfig, GitHubConfig, ServerConfig, config_dir,
    config_file_path, load_config, load_config_from,
};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::RepoId;
pub use github::issues::{GitHubIssues, Issue, IssueSource, Label};

// ============================================================================
// Aggregation
// ============================================================================

pub use aggregate::{FetchOutcome, IssueMapping, UserFetchError, fetch_all};
pub use board::{IssueBoard, RefreshReport};

// ============================================================================
// Caching
// ============================================================================

pub use cache::{CacheEntry, IssueCache};

// ============================================================================
// Modules
// ============================================================================

pub mod aggregate;
pub mod auth;
pub mod board;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
