//! Free-tier quota rules.
//!
//! Every identity gets [`FREE_TIER_LIMIT`] generations; a premium grant
//! overrides the ceiling while it is active. These are pure decision
//! functions — the ledger state itself lives in the database.

use serde::Serialize;

use crate::types::Timestamp;

/// Number of free generations per identity.
pub const FREE_TIER_LIMIT: i32 = 3;

/// Reason string returned when a check passes.
pub const REASON_OK: &str = "ok";

/// Reason string returned when the free tier is exhausted.
pub const REASON_FREE_TIER_EXHAUSTED: &str = "free_tier_exhausted";

/// Result of evaluating an identity's quota state.
///
/// Quota exhaustion is a valid outcome, not a fault: `allowed == false`
/// with `reason == "free_tier_exhausted"` maps to HTTP 402 on the wire.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuotaCheck {
    pub allowed: bool,
    pub reason: &'static str,
    pub designs_generated: i32,
    pub remaining: i32,
    pub is_premium: bool,
}

impl QuotaCheck {
    /// Conservative deny-by-default snapshot, used when the ledger is
    /// unreachable: a new generation is refused rather than risking an
    /// uncounted one.
    pub fn deny_default() -> Self {
        Self {
            allowed: false,
            reason: REASON_FREE_TIER_EXHAUSTED,
            designs_generated: 0,
            remaining: 0,
            is_premium: false,
        }
    }
}

/// Is a premium grant currently active?
///
/// Active iff the flag is set AND the expiry is absent or in the future.
pub fn premium_active(is_premium: bool, premium_expires_at: Option<Timestamp>, now: Timestamp) -> bool {
    is_premium && premium_expires_at.is_none_or(|expires| expires > now)
}

/// Evaluate the quota for an identity given its ledger row.
pub fn evaluate(
    designs_generated: i32,
    is_premium: bool,
    premium_expires_at: Option<Timestamp>,
    now: Timestamp,
) -> QuotaCheck {
    let premium = premium_active(is_premium, premium_expires_at, now);
    let allowed = premium || designs_generated < FREE_TIER_LIMIT;
    QuotaCheck {
        allowed,
        reason: if allowed { REASON_OK } else { REASON_FREE_TIER_EXHAUSTED },
        designs_generated,
        remaining: (FREE_TIER_LIMIT - designs_generated).max(0),
        is_premium: premium,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
