// SPDX-License-Identifier: Apache-2.0

//! Startup: populate the board before the listener opens.

use std::sync::Arc;

use teamboard_core::{IssueBoard, IssueCache, IssueSource, RepoId, fetch_all};
use tracing::{info, instrument, warn};

use crate::state::persist;

/// Builds the initial board.
///
/// With a cache, a successful load is used as-is and no request is made.
/// Otherwise the whole roster is fetched; failed users are logged and left
/// out, and the result is written to the cache when one is configured.
#[instrument(skip_all, fields(repo = %repo))]
pub async fn initial_board(
    source: Arc<dyn IssueSource>,
    repo: &RepoId,
    roster: &[String],
    cache: Option<&IssueCache>,
) -> IssueBoard {
    if let Some(issues) = cache.and_then(IssueCache::load) {
        info!(users = issues.len(), "Using cached issues");
        return IssueBoard::new(issues);
    }

    let outcome = fetch_all(source, repo, roster).await;
    if let Some(err) = outcome.error() {
        warn!(error = %err, "Starting with an incomplete board");
    }

    let board = IssueBoard::new(outcome.issues);
    if let Some(cache) = cache {
        persist(cache, board.snapshot()).await;
    }
    board
}
