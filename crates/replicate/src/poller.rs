//! Bounded, cancellable polling loop for predictions.
//!
//! After submission the caller holds the request open and drives the
//! prediction to a terminal [`JobOutcome`]: sleep a fixed interval, query
//! status, repeat, up to a fixed attempt ceiling. Exceeding the ceiling
//! is a timeout, which is a distinct classification from an upstream
//! failure. The loop suspends between polls and aborts promptly when the
//! supplied [`CancellationToken`] fires.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::api::{Prediction, PredictionStatus, ReplicateApi, ReplicateError};

/// Default sleep between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default maximum number of polls before declaring a timeout
/// (120 x 1s = a two-minute ceiling).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 120;

/// Polling cadence and ceiling.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Terminal result of driving a prediction to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The prediction succeeded; the output was normalized to one URL.
    Succeeded { image_url: String },
    /// The prediction ran and reported failure.
    Failed { reason: String },
    /// The attempt ceiling was exceeded before a terminal status.
    TimedOut,
    /// The caller's cancellation token fired mid-poll.
    Cancelled,
}

/// Source of prediction status snapshots.
///
/// Seam between the poller and the REST client so the loop can be tested
/// without a live service.
#[async_trait]
pub trait PredictionSource: Send + Sync {
    async fn get_prediction(&self, id: &str) -> Result<Prediction, ReplicateError>;
}

#[async_trait]
impl PredictionSource for ReplicateApi {
    async fn get_prediction(&self, id: &str) -> Result<Prediction, ReplicateError> {
        ReplicateApi::get_prediction(self, id).await
    }
}

/// Poll a prediction until it reaches a terminal state, times out, or is
/// cancelled.
///
/// Transport errors from the status query propagate as `Err`; upstream
/// job failure is `Ok(JobOutcome::Failed)`. A succeeded prediction with
/// no recognizable output is an [`ReplicateError::UnrecognizedOutput`]
/// error.
pub async fn poll_until_terminal(
    source: &dyn PredictionSource,
    prediction_id: &str,
    config: PollConfig,
    cancel: &CancellationToken,
) -> Result<JobOutcome, ReplicateError> {
    for attempt in 1..=config.max_attempts {
        tokio::select! {
            () = cancel.cancelled() => {
                tracing::info!(prediction_id, attempt, "Polling cancelled");
                return Ok(JobOutcome::Cancelled);
            }
            () = tokio::time::sleep(config.interval) => {}
        }

        let prediction = source.get_prediction(prediction_id).await?;

        match prediction.status {
            PredictionStatus::Succeeded => {
                let output = prediction.output.ok_or_else(|| {
                    ReplicateError::UnrecognizedOutput("succeeded with no output".to_string())
                })?;
                let image_url = output.into_image_url()?;
                tracing::info!(prediction_id, attempt, %image_url, "Prediction succeeded");
                return Ok(JobOutcome::Succeeded { image_url });
            }
            PredictionStatus::Failed => {
                let reason = prediction
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| "Generation failed".to_string());
                tracing::warn!(prediction_id, attempt, reason = %reason, "Prediction failed");
                return Ok(JobOutcome::Failed { reason });
            }
            PredictionStatus::Canceled => {
                tracing::warn!(prediction_id, attempt, "Prediction canceled upstream");
                return Ok(JobOutcome::Failed {
                    reason: "Generation canceled".to_string(),
                });
            }
            PredictionStatus::Starting
            | PredictionStatus::Processing
            | PredictionStatus::Unknown => {
                tracing::debug!(prediction_id, attempt, status = ?prediction.status, "Still in progress");
            }
        }
    }

    tracing::warn!(
        prediction_id,
        max_attempts = config.max_attempts,
        "Polling ceiling exceeded"
    );
    Ok(JobOutcome::TimedOut)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
