//! Repository for the `designs` table.

use sqlx::PgPool;

use roomlift_core::types::Identity;

use crate::models::design::{CreateDesign, Design};

/// Column list for `designs` queries.
const COLUMNS: &str = "\
    id, user_id, original_image, generated_image, prompt, \
    room_type, style, palette, created_at";

/// Maximum page size for the gallery listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for the gallery listing.
const DEFAULT_LIMIT: i64 = 50;

/// Insert and list operations for completed designs.
pub struct DesignRepo;

impl DesignRepo {
    /// Persist a completed design. Returns the stored row.
    pub async fn insert(pool: &PgPool, input: &CreateDesign) -> Result<Design, sqlx::Error> {
        let query = format!(
            "INSERT INTO designs \
             (user_id, original_image, generated_image, prompt, room_type, style, palette) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Design>(&query)
            .bind(&input.user_id)
            .bind(&input.original_image)
            .bind(&input.generated_image)
            .bind(&input.prompt)
            .bind(&input.room_type)
            .bind(&input.style)
            .bind(&input.palette)
            .fetch_one(pool)
            .await
    }

    /// List an identity's designs, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &Identity,
        limit: Option<i64>,
    ) -> Result<Vec<Design>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let query = format!(
            "SELECT {COLUMNS} FROM designs \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Design>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
