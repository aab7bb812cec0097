//! Handlers for the usage ledger endpoint.
//!
//! One POST endpoint dispatching on an `action` field, mirroring the
//! client wire contract:
//! - `check`     — evaluate the identity's quota (lazily creating its
//!                 ledger row); quota exhaustion is a 402 with a full
//!                 snapshot body, not an error.
//! - `increment` — atomically count one completed generation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use roomlift_core::quota;
use roomlift_db::models::usage::{IncrementResponse, UsageRequest};
use roomlift_db::repositories::UsageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::ApiToken;
use crate::state::AppState;

/// POST /api/v1/usage
pub async fn usage(
    _auth: ApiToken,
    State(state): State<AppState>,
    Json(input): Json<UsageRequest>,
) -> AppResult<Response> {
    let user_id = input
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing userId".to_string()))?;

    match input.action.as_deref() {
        Some("check") => check(&state, &user_id).await,
        Some("increment") => increment(&state, &user_id).await,
        _ => Err(AppError::BadRequest("Unknown action".to_string())),
    }
}

/// Evaluate the quota, creating a zero ledger row if needed.
async fn check(state: &AppState, user_id: &str) -> AppResult<Response> {
    let record = UsageRepo::get_or_create(&state.pool, &user_id.to_string()).await?;

    let result = quota::evaluate(
        record.designs_generated,
        record.is_premium,
        record.premium_expires_at,
        chrono::Utc::now(),
    );

    tracing::debug!(
        user_id,
        designs_generated = result.designs_generated,
        allowed = result.allowed,
        is_premium = result.is_premium,
        "Usage check"
    );

    let status = if result.allowed {
        StatusCode::OK
    } else {
        StatusCode::PAYMENT_REQUIRED
    };
    Ok((status, Json(result)).into_response())
}

/// Count one completed generation.
async fn increment(state: &AppState, user_id: &str) -> AppResult<Response> {
    let designs_generated = UsageRepo::increment(&state.pool, &user_id.to_string()).await?;

    tracing::info!(user_id, designs_generated, "Usage incremented");

    Ok(Json(IncrementResponse {
        success: true,
        designs_generated,
        remaining: (quota::FREE_TIER_LIMIT - designs_generated).max(0),
    })
    .into_response())
}
