//! REST API client for the Replicate prediction endpoints.
//!
//! Wraps prediction creation and status retrieval using [`reqwest`].
//! Authentication is a `Token` authorization header; the model is pinned
//! to a fixed version identifier supplied by configuration.

use serde::{Deserialize, Serialize};

use crate::output::PredictionOutput;

/// Fixed inference hyperparameters for the room-redesign model.
const NUM_INFERENCE_STEPS: u32 = 25;
const GUIDANCE_SCALE: f64 = 7.0;
const CONTROL_SCALE: f64 = 1.0;

/// HTTP client for the Replicate predictions API.
pub struct ReplicateApi {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model_version: String,
}

/// Input payload for one image-to-image prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionInput {
    pub image: String,
    pub prompt: String,
    pub negative_prompt: String,
    pub num_inference_steps: u32,
    pub guidance_scale: f64,
    pub control_scale: f64,
}

impl PredictionInput {
    /// Build the input for a prediction with the fixed hyperparameters.
    pub fn new(image: String, prompt: String, negative_prompt: String) -> Self {
        Self {
            image,
            prompt,
            negative_prompt,
            num_inference_steps: NUM_INFERENCE_STEPS,
            guidance_scale: GUIDANCE_SCALE,
            control_scale: CONTROL_SCALE,
        }
    }
}

/// Lifecycle status reported by the service for a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    /// Any status string this client does not know; treated as
    /// still-in-progress by the poller.
    #[serde(other)]
    Unknown,
}

/// A prediction resource as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    /// Server-assigned opaque job identifier.
    pub id: String,
    pub status: PredictionStatus,
    /// Present once the prediction succeeds. The shape varies by model;
    /// see [`PredictionOutput`].
    #[serde(default)]
    pub output: Option<PredictionOutput>,
    /// Upstream error text, present when the prediction failed.
    #[serde(default)]
    pub error: Option<String>,
}

/// Errors from the Replicate REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ReplicateError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Replicate API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A succeeded prediction carried an output shape this client does
    /// not recognize.
    #[error("Unrecognized prediction output shape: {0}")]
    UnrecognizedOutput(String),
}

impl ReplicateApi {
    /// Create a new API client.
    ///
    /// * `api_url`       - Base URL, e.g. `https://api.replicate.com/v1`.
    /// * `api_key`       - Account API token.
    /// * `model_version` - Pinned model version hash.
    pub fn new(api_url: String, api_key: String, model_version: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model_version,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: String,
        api_key: String,
        model_version: String,
    ) -> Self {
        Self {
            client,
            api_url,
            api_key,
            model_version,
        }
    }

    /// Submit a prediction for execution.
    ///
    /// Sends `POST /predictions` with the pinned model version and the
    /// given input. Returns the created prediction, whose `id` is then
    /// polled via [`get_prediction`](Self::get_prediction).
    pub async fn create_prediction(
        &self,
        input: &PredictionInput,
    ) -> Result<Prediction, ReplicateError> {
        let body = serde_json::json!({
            "version": self.model_version,
            "input": input,
        });

        let response = self
            .client
            .post(format!("{}/predictions", self.api_url))
            .header("Authorization", format!("Token {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Retrieve the current state of a prediction.
    ///
    /// Sends `GET /predictions/{id}`.
    pub async fn get_prediction(&self, id: &str) -> Result<Prediction, ReplicateError> {
        let response = self
            .client
            .get(format!("{}/predictions/{}", self.api_url, id))
            .header("Authorization", format!("Token {}", self.api_key))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ReplicateError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ReplicateError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ReplicateError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ReplicateError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
