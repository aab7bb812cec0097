//! Route definitions.
//!
//! Each submodule exposes a `router()` returning a `Router<AppState>`;
//! `api_routes` assembles everything that lives under `/api/v1`.

use axum::Router;

use crate::state::AppState;

pub mod designs;
pub mod health;
pub mod usage;

/// All routes nested under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(designs::router())
        .merge(usage::router())
}
