//! Repository for the `usage` ledger table.
//!
//! The counter is only ever moved by [`UsageRepo::increment`], a single
//! atomic upsert-add statement, so overlapping requests for the same
//! identity cannot lose updates.

use sqlx::PgPool;

use roomlift_core::types::Identity;

use crate::models::usage::UsageRecord;

/// Column list for `usage` queries.
const COLUMNS: &str = "\
    user_id, designs_generated, is_premium, premium_expires_at, \
    created_at, updated_at";

/// Ledger operations keyed by identity.
pub struct UsageRepo;

impl UsageRepo {
    /// Fetch the ledger row for an identity, creating a zero record if
    /// none exists yet.
    ///
    /// The insert uses `ON CONFLICT DO NOTHING` so concurrent first
    /// checks for the same identity both succeed.
    pub async fn get_or_create(
        pool: &PgPool,
        user_id: &Identity,
    ) -> Result<UsageRecord, sqlx::Error> {
        sqlx::query("INSERT INTO usage (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM usage WHERE user_id = $1");
        sqlx::query_as::<_, UsageRecord>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Atomically add one to the identity's counter, creating the row if
    /// absent. Returns the new count.
    pub async fn increment(pool: &PgPool, user_id: &Identity) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO usage (user_id, designs_generated) VALUES ($1, 1) \
             ON CONFLICT (user_id) DO UPDATE \
             SET designs_generated = usage.designs_generated + 1, updated_at = NOW() \
             RETURNING designs_generated",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Set or clear a premium grant for an identity.
    ///
    /// Used by the (out-of-scope) purchase flow and by tests; the core
    /// pipeline only reads the premium fields.
    pub async fn set_premium(
        pool: &PgPool,
        user_id: &Identity,
        is_premium: bool,
        premium_expires_at: Option<roomlift_core::types::Timestamp>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO usage (user_id, is_premium, premium_expires_at) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO UPDATE \
             SET is_premium = $2, premium_expires_at = $3, updated_at = NOW()",
        )
        .bind(user_id)
        .bind(is_premium)
        .bind(premium_expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}
