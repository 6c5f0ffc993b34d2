// SPDX-License-Identifier: Apache-2.0

//! File cache for the aggregate issue mapping.
//!
//! Stores the whole board as one JSON document with an embedded timestamp.
//! Loading is all-or-nothing: a missing, empty or malformed file is a cache
//! miss and the caller falls back to a live fetch. There is no expiry.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::aggregate::IssueMapping;

/// On-disk representation of a cached board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Issues keyed by assignee login.
    pub issues: IssueMapping,
    /// When the entry was written.
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create a new cache entry stamped with the current time.
    #[must_use]
    pub fn new(issues: IssueMapping) -> Self {
        Self {
            issues,
            cached_at: Utc::now(),
        }
    }

    /// Parses a cache document.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a valid cache document.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("Failed to parse cache contents")
    }

    /// Serializes this entry as a cache document.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be serialized.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).context("Failed to serialize cache entry")
    }
}

/// Single-file cache for the issue board.
#[derive(Debug, Clone)]
pub struct IssueCache {
    path: PathBuf,
}

impl IssueCache {
    /// Creates a cache stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the cache file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached mapping.
    ///
    /// Returns `None` if the file is missing, unreadable or malformed. The
    /// reason is logged, never returned.
    #[must_use]
    pub fn load(&self) -> Option<IssueMapping> {
        match self.read() {
            Ok(Some(entry)) => {
                info!(
                    path = %self.path.display(),
                    users = entry.issues.len(),
                    cached_at = %entry.cached_at,
                    "Loaded issues from cache"
                );
                Some(entry.issues)
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "No cache file");
                None
            }
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(path = %self.path.display(), error = %reason, "Ignoring unusable cache");
                None
            }
        }
    }

    /// Writes `issues` to the cache file, replacing any previous content.
    ///
    /// Creates parent directories if they don't exist.
    /// The entry is written to a uniquely named temp file in the same
    /// directory and renamed over the target, so concurrent writers never
    /// share a temp file and readers never see a partial document.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be serialized or written.
    pub fn save(&self, issues: &IssueMapping) -> Result<()> {
        let entry = CacheEntry::new(issues.clone());
        let contents = entry.encode()?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create cache directory: {}", parent.display())
                })?;
                parent
            }
            _ => Path::new("."),
        };

        // Atomic write: each writer gets its own temp file next to the target
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create cache temp file in {}", dir.display()))?;
        temp.write_all(&contents)
            .with_context(|| format!("Failed to write cache temp file: {}", temp.path().display()))?;

        temp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to rename cache file: {}", self.path.display()))?;

        debug!(path = %self.path.display(), users = issues.len(), "Wrote issue cache");
        Ok(())
    }

    fn read(&self) -> Result<Option<CacheEntry>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read(&self.path)
            .with_context(|| format!("Failed to read cache file: {}", self.path.display()))?;

        CacheEntry::decode(&contents).map(Some)
    }
}
