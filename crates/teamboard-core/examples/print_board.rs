// SPDX-License-Identifier: Apache-2.0

//! Fetch a team's assigned issues and print them to the terminal.
//!
//! Run with: `GITHUB_TOKEN=... cargo run --example print_board -p teamboard-core -- rust-lang/cargo epage weihanglo`

use std::sync::Arc;

use secrecy::SecretString;
use teamboard_core::github::auth::create_client;
use teamboard_core::{GitHubConfig, GitHubIssues, IssueBoard, RepoId, TokenProvider};

/// Reads the token from `GITHUB_TOKEN` only.
struct GitHubTokenVar;

impl TokenProvider for GitHubTokenVar {
    fn github_token(&self) -> Option<SecretString> {
        std::env::var("GITHUB_TOKEN").ok().map(SecretString::from)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let repo: RepoId = args
        .next()
        .unwrap_or_else(|| "openshift/origin".to_string())
        .parse()?;
    let users: Vec<String> = args.collect();

    let client = create_client(&GitHubTokenVar, &GitHubConfig::default())?;
    let board = IssueBoard::default();
    let report = board
        .refresh(Arc::new(GitHubIssues::new(client)), &repo, &users)
        .await;

    for (user, issues) in board.snapshot().iter() {
        println!("@{user}");
        for issue in issues {
            let labels: Vec<&str> = issue.labels.iter().map(|l| l.name.as_str()).collect();
            println!("  #{} {} [{}]", issue.number, issue.title, labels.join(", "));
        }
    }

    if let Some(err) = report.error() {
        eprintln!("{err}");
    }
    Ok(())
}
