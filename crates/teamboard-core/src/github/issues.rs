// SPDX-License-Identifier: Apache-2.0

//! Assigned-issue queries against GitHub.
//!
//! [`IssueSource`] is the seam between the aggregator and the network:
//! [`GitHubIssues`] implements it with Octocrab, tests implement it with
//! in-memory fakes.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::RepoId;
use crate::error::BoardError;

/// A label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label name.
    pub name: String,
    /// Display color as six hex digits, without the leading `#`.
    pub color: String,
}

/// An issue as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number within the repository.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Labels in the order GitHub returned them.
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl From<octocrab::models::issues::Issue> for Issue {
    fn from(issue: octocrab::models::issues::Issue) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            labels: issue
                .labels
                .into_iter()
                .map(|l| Label {
                    name: l.name,
                    color: l.color,
                })
                .collect(),
        }
    }
}

/// Lists the issues in a repository assigned to one user.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Returns the first page of open issues in `repo` assigned to `user`.
    ///
    /// One call is one remote request. Implementations must not retry.
    async fn fetch_for_user(&self, repo: &RepoId, user: &str) -> Result<Vec<Issue>, BoardError>;
}

/// [`IssueSource`] backed by the GitHub REST API.
#[derive(Clone)]
pub struct GitHubIssues {
    client: Octocrab,
}

impl GitHubIssues {
    /// Wraps an already configured Octocrab client.
    #[must_use]
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IssueSource for GitHubIssues {
    #[instrument(skip(self), fields(repo = %repo))]
    async fn fetch_for_user(&self, repo: &RepoId, user: &str) -> Result<Vec<Issue>, BoardError> {
        debug!("Listing assigned issues");

        let page = self
            .client
            .issues(&repo.owner, &repo.name)
            .list()
            .assignee(user)
            .send()
            .await?;

        let issues: Vec<Issue> = page.items.into_iter().map(Issue::from).collect();

        debug!(count = issues.len(), "Listed assigned issues");
        Ok(issues)
    }
}
