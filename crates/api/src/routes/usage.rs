//! Route for the usage ledger.
//!
//! ```text
//! POST /usage    usage  (action: "check" | "increment")
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::usage;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/usage", post(usage::usage))
}
