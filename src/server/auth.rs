//! Request identity
//!
//! Bearer tokens resolve through the session store. A request may instead
//! ask for the travel-concierge test bypass, which only works when the
//! service was explicitly configured to allow it.

use axum::http::HeaderMap;

use super::AppState;
use crate::error::ApiError;

/// Fixed identity used by the test bypass.
pub const MOCK_USER_ID: &str = "test-user-123";

/// Resolve the caller's user id.
///
/// A valid bearer token always wins. Without one, the bypass applies only
/// when both the request asked for it and the config allows it; otherwise
/// the request is unauthorized.
pub async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
    bypass_requested: bool,
) -> Result<String, ApiError> {
    if let Some(token) = bearer_token(headers) {
        if let Some(user_id) = state.sessions.user_for_token(token).await? {
            return Ok(user_id);
        }
    }

    if bypass_requested && state.config.allow_test_bypass {
        tracing::debug!("Using mock identity for travel concierge test request");
        return Ok(MOCK_USER_ID.to_string());
    }

    Err(ApiError::Unauthorized("Unauthorized".into()))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Ownership check for chat-scoped operations. A mismatch reads the same
/// as missing credentials to the caller.
pub fn ensure_owner(chat_user_id: &str, user_id: &str) -> Result<(), ApiError> {
    if chat_user_id == user_id {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("Unauthorized".into()))
    }
}
