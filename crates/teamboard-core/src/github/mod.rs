// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides client construction and the assigned-issues query.

use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

pub mod auth;
pub mod issues;

/// A repository identifier in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoId {
    /// Creates a repository identifier from its parts.
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Returns the web URL of an issue in this repository.
    #[must_use]
    pub fn issue_url(&self, number: u64) -> String {
        format!("https://github.com/{}/{}/issues/{number}", self.owner, self.name)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = BoardError;

    /// Parses an owner/repo string.
    ///
    /// Validates format: exactly one `/`, non-empty parts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self::new(owner, name))
            }
            _ => Err(BoardError::InvalidRepo {
                input: s.to_string(),
            }),
        }
    }
}
