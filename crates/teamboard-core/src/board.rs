// SPDX-License-Identifier: Apache-2.0

//! The shared, lock-guarded issue board.
//!
//! [`IssueBoard`] owns the mapping that the HTTP handlers render and the
//! refresh path replaces. Readers take a snapshot (`Arc<IssueMapping>`)
//! under the lock and render without holding it. A refresh builds its new
//! mapping privately through [`fetch_all`] and swaps it in with one lock
//! acquisition, so a reader never observes a half-populated board.
//!
//! Refreshes are single-flight: requests that arrive while a refresh is in
//! flight wait for it and share its report instead of starting another
//! fetch pass.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, instrument};

use crate::aggregate::{FetchOutcome, IssueMapping, UserFetchError, fetch_all};
use crate::error::BoardError;
use crate::github::RepoId;
use crate::github::issues::IssueSource;

/// Summary of one refresh, shared by every request it served.
#[derive(Debug, Clone, Default)]
pub struct RefreshReport {
    /// Distinct users that were queried.
    pub total: usize,
    /// Users whose fetch failed. Their previous issues were kept.
    pub failures: Vec<UserFetchError>,
    /// `true` if this caller joined a refresh started by another request.
    pub coalesced: bool,
}

impl RefreshReport {
    /// Returns `true` if the roster was non-empty and no user was fetched.
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        self.total > 0 && self.failures.len() == self.total
    }

    /// The aggregate error for this refresh, if any user failed.
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

/// Process-wide holder of the current issue mapping.
#[derive(Debug, Default)]
pub struct IssueBoard {
    current: Mutex<Arc<IssueMapping>>,
    refresh_gate: tokio::sync::Mutex<RefreshReport>,
    completed_refreshes: AtomicU64,
}

impl IssueBoard {
    /// Creates a board holding `issues`.
    #[must_use]
    pub fn new(issues: IssueMapping) -> Self {
        Self {
            current: Mutex::new(Arc::new(issues)),
            ..Self::default()
        }
    }

    /// Returns the current mapping.
    ///
    /// The returned snapshot is immutable; later refreshes swap in a new
    /// mapping and leave this one untouched.
    #[must_use]
    pub fn snapshot(&self) -> Arc<IssueMapping> {
        Arc::clone(&self.current.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the whole mapping. Unlike [`IssueBoard::apply`], nothing is
    /// carried over from the previous snapshot.
    pub fn replace(&self, issues: IssueMapping) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Arc::new(issues);
    }

    /// Number of refreshes that have completed on this board.
    #[must_use]
    pub fn refresh_count(&self) -> u64 {
        self.completed_refreshes.load(Ordering::Acquire)
    }

    /// Swaps in a freshly fetched mapping.
    ///
    /// Users that failed in `outcome` keep their previous issues if they had
    /// any; everyone else is replaced wholesale.
    pub fn apply(&self, outcome: FetchOutcome) -> RefreshReport {
        let FetchOutcome {
            mut issues,
            failures,
            total,
        } = outcome;

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        for failure in &failures {
            if let Some(previous) = current.get(&failure.user) {
                debug!(user = %failure.user, "Keeping previous issues for failed user");
                issues.insert(failure.user.clone(), previous.clone());
            }
        }
        *current = Arc::new(issues);

        RefreshReport {
            total,
            failures,
            coalesced: false,
        }
    }

    /// Re-fetches the roster and swaps the result in.
    ///
    /// Concurrent callers are coalesced: if a refresh completes while a
    /// caller is waiting for the gate, that caller returns the completed
    /// refresh's report (with `coalesced` set) without fetching again.
    #[instrument(skip(self, source, users), fields(repo = %repo))]
    pub async fn refresh(
        &self,
        source: Arc<dyn IssueSource>,
        repo: &RepoId,
        users: &[String],
    ) -> RefreshReport {
        let observed = self.completed_refreshes.load(Ordering::Acquire);
        let mut last = self.refresh_gate.lock().await;

        if self.completed_refreshes.load(Ordering::Acquire) != observed {
            debug!("Joined a refresh that completed while waiting");
            return RefreshReport {
                coalesced: true,
                ..last.clone()
            };
        }

        let outcome = fetch_all(source, repo, users).await;
        let report = self.apply(outcome);

        *last = report.clone();
        self.completed_refreshes.fetch_add(1, Ordering::Release);

        info!(
            users = report.total,
            failed = report.failures.len(),
            "Board refreshed"
        );
        report
    }
}
