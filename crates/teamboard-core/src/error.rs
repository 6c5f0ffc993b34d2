// SPDX-License-Identifier: Apache-2.0

//! Error types for Teamboard.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur during Teamboard operations.
#[derive(Error, Debug)]
pub enum BoardError {
    /// GitHub API error from octocrab.
    #[error("GitHub API error: {message}")]
    GitHub {
        /// Error message.
        message: String,
    },

    /// Configuration file or environment error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Repository identifier is not in `owner/name` form.
    #[error("Invalid repository '{input}': expected owner/name")]
    InvalidRepo {
        /// The rejected input.
        input: String,
    },

    /// At least one roster member could not be fetched.
    #[error("Failed to fetch issues for {failed} of {total} users ({})", users.join(", "))]
    PartialFetch {
        /// Number of users whose fetch failed.
        failed: usize,
        /// Number of users in the roster.
        total: usize,
        /// Logins of the users whose fetch failed.
        users: Vec<String>,
    },
}

impl From<octocrab::Error> for BoardError {
    fn from(err: octocrab::Error) -> Self {
        BoardError::GitHub {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for BoardError {
    fn from(err: config::ConfigError) -> Self {
        BoardError::Config {
            message: err.to_string(),
        }
    }
}
