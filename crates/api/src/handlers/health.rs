//! Health check handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /health
///
/// Reports service status, crate version, and database reachability.
/// Always returns 200; a broken database shows up as `db_healthy: false`
/// so load balancers can distinguish "up" from "fully functional".
pub async fn health_check(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let db_healthy = roomlift_db::health_check(&state.pool).await.is_ok();

    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "db_healthy": db_healthy,
    })))
}
