use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use roomlift_core::error::CoreError;
use roomlift_replicate::ReplicateError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds variants for the
/// generation proxy's failure taxonomy. Implements [`IntoResponse`] to
/// produce consistent `{ "error": ..., "code": ... }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `roomlift_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The inference service rejected a request or the transport failed.
    #[error(transparent)]
    Replicate(#[from] ReplicateError),

    /// The upstream job ran and reported failure.
    #[error("Generation failed: {0}")]
    UpstreamFailed(String),

    /// The polling ceiling was exceeded before a terminal status.
    #[error("Generation timeout - took too long")]
    Timeout,

    /// The identity's free tier is exhausted and no premium is active.
    #[error("Free tier exhausted - upgrade to continue")]
    QuotaExceeded,

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Generation proxy taxonomy ---
            AppError::Replicate(err) => classify_replicate_error(err),
            AppError::UpstreamFailed(reason) => {
                (StatusCode::BAD_REQUEST, "GENERATION_FAILED", reason.clone())
            }
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "GENERATION_TIMEOUT",
                "Generation timeout - took too long".to_string(),
            ),
            AppError::QuotaExceeded => (
                StatusCode::PAYMENT_REQUIRED,
                "FREE_TIER_EXHAUSTED",
                "Free tier exhausted - upgrade to continue".to_string(),
            ),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify an inference-service error.
///
/// Submission rejections and transport failures are server errors (the
/// client's request was fine); an unrecognizable output shape is surfaced
/// as an upstream generation fault.
fn classify_replicate_error(err: &ReplicateError) -> (StatusCode, &'static str, String) {
    match err {
        ReplicateError::ApiError { status, .. } => {
            tracing::error!(upstream_status = status, "Replicate API error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                format!("Replicate API error: {status}"),
            )
        }
        ReplicateError::Request(e) => {
            tracing::error!(error = %e, "Replicate request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                "Inference service unreachable".to_string(),
            )
        }
        ReplicateError::UnrecognizedOutput(detail) => {
            tracing::error!(detail = %detail, "Unrecognized prediction output");
            (
                StatusCode::BAD_REQUEST,
                "GENERATION_FAILED",
                "No output generated".to_string(),
            )
        }
    }
}
