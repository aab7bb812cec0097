//! HTTP client for the backend API.
//!
//! Thin reqwest wrapper over the three backend operations: usage check,
//! usage increment, and design generation. Response shapes mirror the
//! wire contract, not the server's internal models.

use serde::Deserialize;
use serde_json::json;

use roomlift_core::types::Identity;

/// Errors surfaced by the generation call.
///
/// Usage calls never return these: a failed check degrades to a
/// conservative deny, a failed increment is logged and swallowed.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with an error body (`{error, code}`).
    #[error("{message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

impl ClientError {
    /// True when the backend refused the generation on quota grounds.
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, Self::Api { status: 402, .. })
    }
}

/// Usage-check response (`POST /api/v1/usage`, action `check`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UsageSnapshot {
    pub allowed: bool,
    pub reason: String,
    pub designs_generated: i32,
    pub remaining: i32,
    pub is_premium: bool,
}

impl UsageSnapshot {
    /// Conservative fallback used when the ledger is unreachable: deny
    /// rather than risk an uncounted generation.
    pub fn deny_default() -> Self {
        Self {
            allowed: false,
            reason: roomlift_core::quota::REASON_FREE_TIER_EXHAUSTED.to_string(),
            designs_generated: 0,
            remaining: 0,
            is_premium: false,
        }
    }
}

/// Stored design record as returned inside a generation response.
#[derive(Debug, Clone, Deserialize)]
pub struct DesignRecord {
    pub id: i64,
    pub user_id: Identity,
    pub original_image: String,
    pub generated_image: String,
    pub prompt: String,
    pub room_type: Option<String>,
    pub style: Option<String>,
    pub palette: Option<String>,
}

/// Successful generation response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedDesign {
    pub success: bool,
    #[serde(rename = "designId")]
    pub design_id: i64,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub design: DesignRecord,
}

/// Error body shape shared by all backend error responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

/// Input for a generation request.
#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub image_url: String,
    pub prompt: String,
    pub room_type: Option<String>,
    pub style: Option<String>,
    pub palette: Option<String>,
}

/// Authenticated client for the backend API.
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl BackendClient {
    pub fn new(base_url: String, api_token: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_token)
    }

    pub fn with_client(client: reqwest::Client, base_url: String, api_token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    /// Check the identity's quota state.
    ///
    /// A 402 is a valid answer (exhausted quota), not an error. Any
    /// transport or decode failure degrades to
    /// [`UsageSnapshot::deny_default`] so an unreachable ledger can
    /// never hand out unmetered generations.
    pub async fn check_usage(&self, user_id: &Identity) -> UsageSnapshot {
        let result = self
            .post_usage(user_id, "check")
            .await
            .and_then(|response| {
                // 200 and 402 both carry a full snapshot body.
                if response.status().is_success() || response.status().as_u16() == 402 {
                    Ok(response)
                } else {
                    response.error_for_status()
                }
            });

        let response = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "Usage check failed, denying by default");
                return UsageSnapshot::deny_default();
            }
        };

        match response.json::<UsageSnapshot>().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "Usage check returned an unreadable body");
                UsageSnapshot::deny_default()
            }
        }
    }

    /// Record one completed generation against the identity.
    ///
    /// Best effort: the design already exists at this point, so a failed
    /// increment is logged and swallowed rather than shown to the user.
    pub async fn increment_usage(&self, user_id: &Identity) {
        match self.post_usage(user_id, "increment").await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(user_id = %user_id, "Usage incremented");
            }
            Ok(response) => {
                tracing::warn!(
                    user_id = %user_id,
                    status = %response.status(),
                    "Usage increment rejected"
                );
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Usage increment failed");
            }
        }
    }

    /// Submit a generation request and wait for its terminal result.
    ///
    /// The backend holds this request open while the generation runs, so
    /// the call can take minutes.
    pub async fn generate(
        &self,
        user_id: &Identity,
        params: &GenerateParams,
    ) -> Result<GeneratedDesign, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/v1/designs/generate", self.base_url))
            .bearer_auth(&self.api_token)
            .json(&json!({
                "userId": user_id,
                "imageUrl": params.image_url,
                "prompt": params.prompt,
                "roomType": params.room_type,
                "style": params.style,
                "palette": params.palette,
            }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<GeneratedDesign>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    code: body.code.unwrap_or_default(),
                    message: body.error,
                })
            }
            Err(_) => format!("Backend returned {status}"),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            code: String::new(),
            message,
        })
    }

    async fn post_usage(
        &self,
        user_id: &Identity,
        action: &str,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(format!("{}/api/v1/usage", self.base_url))
            .bearer_auth(&self.api_token)
            .json(&json!({ "userId": user_id, "action": action }))
            .send()
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deny_default_blocks_generation() {
        let snapshot = UsageSnapshot::deny_default();
        assert!(!snapshot.allowed);
        assert_eq!(snapshot.reason, "free_tier_exhausted");
        assert_eq!(snapshot.remaining, 0);
    }

    #[test]
    fn quota_error_is_recognised_by_status() {
        let err = ClientError::Api {
            status: 402,
            code: "FREE_TIER_EXHAUSTED".to_string(),
            message: "Free tier exhausted - upgrade to continue".to_string(),
        };
        assert!(err.is_quota_exhausted());

        let other = ClientError::Api {
            status: 400,
            code: "GENERATION_FAILED".to_string(),
            message: "No output generated".to_string(),
        };
        assert!(!other.is_quota_exhausted());
    }

    #[test]
    fn usage_snapshot_parses_wire_shape() {
        let snapshot: UsageSnapshot = serde_json::from_str(
            r#"{"allowed":true,"reason":"ok","designs_generated":1,"remaining":2,"is_premium":false}"#,
        )
        .unwrap();
        assert!(snapshot.allowed);
        assert_eq!(snapshot.designs_generated, 1);
        assert_eq!(snapshot.remaining, 2);
    }

    #[test]
    fn generated_design_parses_wire_shape() {
        let result: GeneratedDesign = serde_json::from_str(
            r#"{
                "success": true,
                "designId": 7,
                "imageUrl": "https://cdn/generated.png",
                "design": {
                    "id": 7,
                    "user_id": "u1",
                    "original_image": "https://cdn/original.jpg",
                    "generated_image": "https://cdn/generated.png",
                    "prompt": "p",
                    "room_type": "kitchen",
                    "style": "modern",
                    "palette": null,
                    "created_at": "2026-08-25T12:00:00Z"
                }
            }"#,
        )
        .unwrap();
        assert!(result.success);
        assert_eq!(result.design_id, 7);
        assert_eq!(result.design.user_id, "u1");
    }

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let client = BackendClient::new("http://localhost:3000/".to_string(), "t".to_string());
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    /// Client against a closed local port, so every request fails at the
    /// transport layer.
    fn unreachable_client() -> BackendClient {
        BackendClient::new("http://127.0.0.1:9".to_string(), "t".to_string())
    }

    #[tokio::test]
    async fn unreachable_ledger_check_denies_by_default() {
        let snapshot = unreachable_client().check_usage(&"u1".to_string()).await;
        assert_eq!(snapshot, UsageSnapshot::deny_default());
    }

    #[tokio::test]
    async fn unreachable_ledger_increment_is_swallowed() {
        // Must return normally; the redesign already happened and a lost
        // ledger tick is not a user-visible failure.
        unreachable_client().increment_usage(&"u1".to_string()).await;
    }

    #[tokio::test]
    async fn unreachable_backend_generate_is_a_request_error() {
        let err = unreachable_client()
            .generate(
                &"u1".to_string(),
                &GenerateParams {
                    image_url: "data:image/jpeg;base64,aGVsbG8=".to_string(),
                    prompt: "p".to_string(),
                    room_type: None,
                    style: None,
                    palette: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));
        assert!(!err.is_quota_exhausted());
    }
}
