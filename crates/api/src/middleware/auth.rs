//! Shared-token bearer authentication extractor.
//!
//! Clients are anonymous devices, so there are no user accounts; every
//! request instead carries the deployment's shared API token as a Bearer
//! credential, matching how the mobile app authenticates to its backend
//! functions.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use roomlift_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the expected Bearer token.
///
/// Use as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(_auth: ApiToken) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiToken;

impl FromRequestParts<AppState> for ApiToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        if token != state.config.api_token {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid API token".into(),
            )));
        }

        Ok(ApiToken)
    }
}
