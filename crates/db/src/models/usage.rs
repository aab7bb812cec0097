//! Usage-ledger models and DTOs.
//!
//! One `usage` row per anonymous identity, created lazily with a zero
//! counter. The counter is monotonically non-decreasing.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use roomlift_core::types::{Identity, Timestamp};

/// A row from the `usage` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UsageRecord {
    pub user_id: Identity,
    pub designs_generated: i32,
    pub is_premium: bool,
    pub premium_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for `POST /api/v1/usage`.
///
/// `action` is matched by the handler ("check" | "increment") so an
/// unknown action is a 400, not a body-decode rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<Identity>,
    pub action: Option<String>,
}

/// Response for a successful increment.
#[derive(Debug, Clone, Serialize)]
pub struct IncrementResponse {
    pub success: bool,
    pub designs_generated: i32,
    pub remaining: i32,
}
