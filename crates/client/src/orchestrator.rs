//! End-to-end redesign flow.
//!
//! Order matters here: quota is checked before any upload or paid work,
//! the photo upload degrades to an inline data URL rather than aborting,
//! and the usage increment runs after a successful generation as best
//! effort. The backend re-checks quota server-side, so the pre-flight
//! here is a fast local refusal, not the enforcement point.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use roomlift_core::prompt::{self, DesignAction};
use roomlift_core::types::Identity;
use roomlift_storage::fallback::upload_or_inline;
use roomlift_storage::store::ImageStore;

use crate::api::{BackendClient, ClientError, GenerateParams, GeneratedDesign, UsageSnapshot};

/// Backend operations the orchestrator depends on.
///
/// Seam for tests; production uses [`BackendClient`].
#[async_trait]
pub trait DesignBackend: Send + Sync {
    async fn check_usage(&self, user_id: &Identity) -> UsageSnapshot;
    async fn increment_usage(&self, user_id: &Identity);
    async fn generate(
        &self,
        user_id: &Identity,
        params: &GenerateParams,
    ) -> Result<GeneratedDesign, ClientError>;
}

#[async_trait]
impl DesignBackend for BackendClient {
    async fn check_usage(&self, user_id: &Identity) -> UsageSnapshot {
        BackendClient::check_usage(self, user_id).await
    }

    async fn increment_usage(&self, user_id: &Identity) {
        BackendClient::increment_usage(self, user_id).await;
    }

    async fn generate(
        &self,
        user_id: &Identity,
        params: &GenerateParams,
    ) -> Result<GeneratedDesign, ClientError> {
        BackendClient::generate(self, user_id, params).await
    }
}

/// One redesign job: a photo plus the design choices for it.
#[derive(Debug, Clone)]
pub struct RedesignRequest {
    pub photo_path: PathBuf,
    pub action: DesignAction,
    pub room_type: String,
    pub style: String,
    pub palette: Option<String>,
    pub custom_prompt: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// Refused locally before any upload or generation work.
    #[error("Free tier exhausted ({designs_generated} designs used)")]
    QuotaExhausted { designs_generated: i32 },

    #[error("Failed to read photo {path}: {source}")]
    ReadPhoto {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Generation(#[from] ClientError),
}

/// Drives the full redesign flow against a backend and an image store.
pub struct Orchestrator {
    backend: Arc<dyn DesignBackend>,
    store: Arc<dyn ImageStore>,
    identity: Identity,
}

impl Orchestrator {
    pub fn new(
        backend: Arc<dyn DesignBackend>,
        store: Arc<dyn ImageStore>,
        identity: Identity,
    ) -> Self {
        Self {
            backend,
            store,
            identity,
        }
    }

    /// Run one redesign end to end and return the stored design.
    pub async fn redesign(
        &self,
        request: &RedesignRequest,
    ) -> Result<GeneratedDesign, OrchestratorError> {
        // Pre-flight quota check, before touching the photo.
        let usage = self.backend.check_usage(&self.identity).await;
        if !usage.allowed {
            tracing::info!(
                designs_generated = usage.designs_generated,
                "Redesign refused: free tier exhausted"
            );
            return Err(OrchestratorError::QuotaExhausted {
                designs_generated: usage.designs_generated,
            });
        }

        let bytes =
            std::fs::read(&request.photo_path).map_err(|source| OrchestratorError::ReadPhoto {
                path: request.photo_path.clone(),
                source,
            })?;
        let content_type = content_type_for(&request.photo_path);
        let filename = format!("photo-{}.jpg", Utc::now().timestamp_millis());

        let image_url =
            upload_or_inline(self.store.as_ref(), &self.identity, &filename, &bytes, content_type)
                .await;

        let prompt = prompt::build_prompt(
            request.action,
            &request.room_type,
            &request.style,
            request.palette.as_deref(),
            request.custom_prompt.as_deref(),
        );

        let result = self
            .backend
            .generate(
                &self.identity,
                &GenerateParams {
                    image_url,
                    prompt,
                    room_type: Some(request.room_type.clone()),
                    style: Some(request.style.clone()),
                    palette: request.palette.clone(),
                },
            )
            .await?;

        tracing::info!(
            design_id = result.design_id,
            image_url = %result.image_url,
            "Design generated"
        );

        // The design exists either way; a failed increment only loses a
        // tick in the ledger and is not worth failing the redesign for.
        self.backend.increment_usage(&self.identity).await;

        Ok(result)
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
