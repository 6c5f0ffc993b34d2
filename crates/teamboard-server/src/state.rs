// SPDX-License-Identifier: Apache-2.0

//! Shared state handed to every request handler.

use std::sync::Arc;

use teamboard_core::{IssueBoard, IssueCache, IssueMapping, IssueSource, RepoId};
use tracing::{info, warn};

use crate::render::Presenter;

/// Everything the HTTP handlers need, shared behind an `Arc`.
pub struct AppState {
    /// The board rendered by `/` and replaced by `?refresh`.
    pub board: IssueBoard,
    /// Backend queried on refresh.
    pub source: Arc<dyn IssueSource>,
    /// Repository being tracked.
    pub repo: RepoId,
    /// Normalized roster.
    pub roster: Vec<String>,
    /// Page renderer.
    pub presenter: Presenter,
    /// Cache written after each refresh. `None` when caching is disabled.
    pub cache: Option<IssueCache>,
}

impl AppState {
    /// Writes the current board to the cache, if caching is enabled.
    pub async fn persist(&self) {
        if let Some(cache) = &self.cache {
            persist(cache, self.board.snapshot()).await;
        }
    }
}

/// Writes `issues` to `cache` on the blocking pool. Failures are logged.
pub async fn persist(cache: &IssueCache, issues: Arc<IssueMapping>) {
    let task_cache = cache.clone();
    let users = issues.len();
    match tokio::task::spawn_blocking(move || task_cache.save(&issues)).await {
        Ok(Ok(())) => info!(path = %cache.path().display(), users, "Cached issues"),
        Ok(Err(e)) => {
            let reason = format!("{e:#}");
            warn!(path = %cache.path().display(), error = %reason, "Failed to write issue cache");
        }
        Err(e) => warn!(error = %e, "Cache write task failed"),
    }
}
