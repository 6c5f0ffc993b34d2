// SPDX-License-Identifier: Apache-2.0

//! HTTP server for the Teamboard issue board.
//!
//! Wires `teamboard-core` to an axum router: the board is populated at
//! startup (from the cache or a live fetch), rendered on `/` with
//! minijinja, and re-fetched on `/?refresh=1`.

mod auth;
pub mod bootstrap;
pub mod cli;
pub mod logging;
pub mod render;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use teamboard_core::github::auth::create_client;
use teamboard_core::{AppConfig, GitHubIssues, IssueCache, IssueSource, RepoId};
use tokio::net::TcpListener;
use tracing::{error, info};

pub use auth::{EnvTokenProvider, TOKEN_VARS};
pub use render::Presenter;
pub use routes::{BoardQuery, router};
pub use state::AppState;

/// Builds the application state from `config` and populates the board.
///
/// # Errors
///
/// Returns an error if the repository is malformed, the GitHub client
/// cannot be built or the page template fails to compile. Fetch failures
/// are logged and never returned.
pub async fn build_state(config: &AppConfig) -> Result<Arc<AppState>> {
    let repo: RepoId = config.board.repo.parse()?;
    let roster = config.board.roster();

    let client = create_client(&EnvTokenProvider, &config.github)
        .context("Failed to create GitHub client")?;
    let source: Arc<dyn IssueSource> = Arc::new(GitHubIssues::new(client));

    let cache = config
        .cache
        .enabled
        .then(|| IssueCache::new(config.cache.file.clone()));
    let presenter = Presenter::new()?;

    let board =
        bootstrap::initial_board(Arc::clone(&source), &repo, &roster, cache.as_ref()).await;

    Ok(Arc::new(AppState {
        board,
        source,
        repo,
        roster,
        presenter,
        cache,
    }))
}

/// Serves the board on `listener` until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Serving issues for {} on http://{addr}", state.repo);
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

/// Runs the server: builds the state, binds `config.server.bind` and serves.
///
/// # Errors
///
/// Returns an error if startup fails or the address cannot be bound.
pub async fn run(config: &AppConfig) -> Result<()> {
    let state = build_state(config).await?;

    let listener = TcpListener::bind(config.server.bind.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;

    serve(listener, state).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down gracefully");
}
