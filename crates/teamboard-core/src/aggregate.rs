// SPDX-License-Identifier: Apache-2.0

//! Concurrent fan-out/fan-in over a roster.
//!
//! [`fetch_all`] spawns one task per distinct user on a [`JoinSet`], lets
//! every task insert its own key into a scratch mapping, and joins all of
//! them before returning. Failures never discard data fetched for other
//! users; they are returned next to the partial mapping in a
//! [`FetchOutcome`] so the caller picks the policy.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinSet;
use tracing::{info, instrument, warn};

use crate::error::BoardError;
use crate::github::RepoId;
use crate::github::issues::{Issue, IssueSource};

/// Issues keyed by assignee login.
pub type IssueMapping = BTreeMap<String, Vec<Issue>>;

/// A fetch that failed for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFetchError {
    /// Login whose fetch failed.
    pub user: String,
    /// Rendered error.
    pub message: String,
}

/// Result of one aggregation pass.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Every user that was fetched successfully, including those with no issues.
    pub issues: IssueMapping,
    /// Users whose fetch failed, in completion order.
    pub failures: Vec<UserFetchError>,
    /// Number of distinct users that were queried.
    pub total: usize,
}

impl FetchOutcome {
    /// Returns `true` if every user was fetched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns `true` if the roster was non-empty and no user was fetched.
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        self.total > 0 && self.failures.len() == self.total
    }

    /// The aggregate error for this pass, if any user failed.
    #[must_use]
    pub fn error(&self) -> Option<BoardError> {
        if self.failures.is_empty() {
            return None;
        }
        Some(BoardError::PartialFetch {
            failed: self.failures.len(),
            total: self.total,
            users: self.failures.iter().map(|f| f.user.clone()).collect(),
        })
    }
}

/// Fetches the assigned issues of every user in `users` concurrently.
///
/// Duplicate logins are queried once. There is no concurrency limit: one
/// task per user runs until the whole roster has completed. A task holds the
/// mapping lock only while inserting its own result.
#[instrument(skip(source, users), fields(repo = %repo, roster_size = users.len()))]
pub async fn fetch_all(
    source: Arc<dyn IssueSource>,
    repo: &RepoId,
    users: &[String],
) -> FetchOutcome {
    let roster = crate::config::normalize_roster(users);
    let total = roster.len();
    if total == 0 {
        return FetchOutcome::default();
    }

    info!("Fetching GitHub issues");

    let scratch: Arc<Mutex<IssueMapping>> = Arc::new(Mutex::new(IssueMapping::new()));
    let mut tasks = JoinSet::new();
    let mut task_users = HashMap::with_capacity(total);

    for user in roster {
        let source = Arc::clone(&source);
        let scratch = Arc::clone(&scratch);
        let repo = repo.clone();
        let task_user = user.clone();

        let handle = tasks.spawn(async move {
            let issues = source
                .fetch_for_user(&repo, &task_user)
                .await
                .map_err(|e| e.to_string())?;

            let count = issues.len();
            scratch
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(task_user.clone(), issues);

            info!(user = %task_user, count, "Fetched assigned issues");
            Ok::<(), String>(())
        });
        task_users.insert(handle.id(), user);
    }

    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next_with_id().await {
        let (id, message) = match joined {
            Ok((_, Ok(()))) => continue,
            Ok((id, Err(message))) => (id, message),
            Err(join_err) => (join_err.id(), format!("fetch task aborted: {join_err}")),
        };
        let user = task_users.remove(&id).unwrap_or_default();
        warn!(user = %user, error = %message, "Failed to fetch assigned issues");
        failures.push(UserFetchError { user, message });
    }

    // Every task has been joined, so this is the only remaining handle.
    let issues = match Arc::try_unwrap(scratch) {
        Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
        Err(shared) => shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone(),
    };

    info!(
        fetched = issues.len(),
        failed = failures.len(),
        "Finished fetching GitHub issues"
    );

    FetchOutcome {
        issues,
        failures,
        total,
    }
}
