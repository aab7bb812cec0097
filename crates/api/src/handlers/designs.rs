//! Handlers for the generation proxy and gallery listing.
//!
//! `generate_design` is a long-lived request: it validates input, gates
//! on the usage ledger, submits one prediction to the inference service,
//! then holds the request open while polling to a terminal outcome
//! (succeeded / failed / timed out). A succeeded generation is only
//! reported once its design record is durably stored — an artifact the
//! caller cannot retrieve later is treated as a failure.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use tokio_util::sync::CancellationToken;

use roomlift_core::prompt::DEFAULT_NEGATIVE_PROMPT;
use roomlift_core::quota;
use roomlift_db::models::design::{
    CreateDesign, GenerateDesignRequest, GenerateDesignResponse, ListDesignsParams,
    ListDesignsResponse,
};
use roomlift_db::repositories::{DesignRepo, UsageRepo};
use roomlift_replicate::{poll_until_terminal, JobOutcome, PredictionInput};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::ApiToken;
use crate::state::AppState;

/// POST /api/v1/designs/generate
pub async fn generate_design(
    _auth: ApiToken,
    State(state): State<AppState>,
    Json(input): Json<GenerateDesignRequest>,
) -> AppResult<impl IntoResponse> {
    let (user_id, image_url, prompt) = match (
        input.user_id.filter(|v| !v.is_empty()),
        input.image_url.filter(|v| !v.is_empty()),
        input.prompt.filter(|v| !v.is_empty()),
    ) {
        (Some(u), Some(i), Some(p)) => (u, i, p),
        _ => {
            return Err(AppError::BadRequest(
                "Missing userId, imageUrl, or prompt".to_string(),
            ))
        }
    };

    // Quota gate before any paid upstream work. The client checks this
    // too, but nothing stops a caller from hitting this endpoint
    // directly.
    let record = UsageRepo::get_or_create(&state.pool, &user_id).await?;
    let check = quota::evaluate(
        record.designs_generated,
        record.is_premium,
        record.premium_expires_at,
        chrono::Utc::now(),
    );
    if !check.allowed {
        tracing::info!(user_id = %user_id, "Generation refused: free tier exhausted");
        return Err(AppError::QuotaExceeded);
    }

    // Submit the prediction.
    let negative_prompt = input
        .negative_prompt
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_NEGATIVE_PROMPT.to_string());

    let prediction = state
        .replicate
        .create_prediction(&PredictionInput::new(
            image_url.clone(),
            prompt.clone(),
            negative_prompt,
        ))
        .await?;

    tracing::info!(
        user_id = %user_id,
        prediction_id = %prediction.id,
        "Prediction submitted, polling"
    );

    // Poll to a terminal outcome. Disconnect cancellation happens by
    // future drop here; the token parameter is for callers that outlive
    // the poll, so a fresh one is passed.
    let outcome = poll_until_terminal(
        state.replicate.as_ref(),
        &prediction.id,
        state.config.poll_config(),
        &CancellationToken::new(),
    )
    .await?;

    let generated_image = match outcome {
        JobOutcome::Succeeded { image_url } => image_url,
        JobOutcome::Failed { reason } => return Err(AppError::UpstreamFailed(reason)),
        JobOutcome::TimedOut => return Err(AppError::Timeout),
        JobOutcome::Cancelled => {
            return Err(AppError::InternalError("Generation cancelled".to_string()))
        }
    };

    // A generation only counts once its record is retrievable.
    let design = DesignRepo::insert(
        &state.pool,
        &CreateDesign {
            user_id: user_id.clone(),
            original_image: image_url,
            generated_image: generated_image.clone(),
            prompt,
            room_type: input.room_type,
            style: input.style,
            palette: input.palette,
        },
    )
    .await?;

    tracing::info!(
        user_id = %user_id,
        design_id = design.id,
        "Design generated and stored"
    );

    Ok(Json(GenerateDesignResponse {
        success: true,
        design_id: design.id,
        image_url: generated_image,
        design,
    }))
}

/// GET /api/v1/designs?userId=...
///
/// Gallery listing: an identity's designs, newest first.
pub async fn list_designs(
    _auth: ApiToken,
    State(state): State<AppState>,
    Query(params): Query<ListDesignsParams>,
) -> AppResult<impl IntoResponse> {
    if params.user_id.is_empty() {
        return Err(AppError::BadRequest("Missing userId".to_string()));
    }

    let designs = DesignRepo::list_for_user(&state.pool, &params.user_id, params.limit).await?;

    tracing::debug!(user_id = %params.user_id, count = designs.len(), "Listed designs");

    Ok(Json(ListDesignsResponse { designs }))
}
