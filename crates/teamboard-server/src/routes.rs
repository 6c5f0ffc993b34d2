// SPDX-License-Identifier: Apache-2.0

//! HTTP routes.
//!
//! The board is served from `/` only; every other path falls through to
//! axum's default 404. A non-empty `refresh` query parameter re-fetches the
//! roster before rendering.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use tracing::{error, warn};

use crate::state::AppState;

/// Query parameters accepted by the board page.
#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    /// Any non-empty value triggers a refresh.
    #[serde(default)]
    pub refresh: Option<String>,
}

impl BoardQuery {
    fn wants_refresh(&self) -> bool {
        self.refresh.as_deref().is_some_and(|r| !r.is_empty())
    }
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/", get(board)).with_state(state)
}

async fn board(State(state): State<Arc<AppState>>, Query(query): Query<BoardQuery>) -> Response {
    if query.wants_refresh() {
        let report = state
            .board
            .refresh(Arc::clone(&state.source), &state.repo, &state.roster)
            .await;

        if let Some(err) = report.error() {
            warn!(error = %err, coalesced = report.coalesced, "Refresh incomplete");
            if report.is_total_failure() {
                return (StatusCode::BAD_GATEWAY, format!("ERROR: {err}")).into_response();
            }
        }

        // The request that ran the refresh writes the cache; joiners don't.
        if !report.coalesced {
            state.persist().await;
        }
    }

    let snapshot = state.board.snapshot();
    match state.presenter.render(&state.repo, &snapshot) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            let reason = format!("{e:#}");
            error!(error = %reason, "Failed to render board");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("ERROR: {reason}")).into_response()
        }
    }
}
