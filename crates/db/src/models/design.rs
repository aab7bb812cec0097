//! Design-record models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use roomlift_core::types::{DbId, Identity, Timestamp};

/// A row from the `designs` table. Immutable after insertion.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Design {
    pub id: DbId,
    pub user_id: Identity,
    pub original_image: String,
    pub generated_image: String,
    pub prompt: String,
    pub room_type: Option<String>,
    pub style: Option<String>,
    pub palette: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a completed design.
#[derive(Debug, Clone)]
pub struct CreateDesign {
    pub user_id: Identity,
    pub original_image: String,
    pub generated_image: String,
    pub prompt: String,
    pub room_type: Option<String>,
    pub style: Option<String>,
    pub palette: Option<String>,
}

/// Body for `POST /api/v1/designs/generate`.
///
/// Field names follow the wire contract (camelCase).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDesignRequest {
    pub user_id: Option<Identity>,
    pub image_url: Option<String>,
    pub prompt: Option<String>,
    pub room_type: Option<String>,
    pub style: Option<String>,
    pub palette: Option<String>,
    pub negative_prompt: Option<String>,
}

/// Response for a successful generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateDesignResponse {
    pub success: bool,
    #[serde(rename = "designId")]
    pub design_id: DbId,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub design: Design,
}

/// Response for the gallery listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListDesignsResponse {
    pub designs: Vec<Design>,
}

/// Query parameters for the gallery listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListDesignsParams {
    #[serde(rename = "userId", default)]
    pub user_id: Identity,
    pub limit: Option<i64>,
}
