//! Request identity extraction
//!
//! Authentication itself happens upstream: the gateway validates the
//! session and installs the authenticated user id in the `x-user-id`
//! header. Owner-scoped handlers take the id from there; a request without
//! it is rejected before any handler logic runs.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated user id, extracted from the gateway-installed header
#[derive(Debug, Clone)]
pub struct UserId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match value {
            Some(uid) => Ok(UserId(uid.to_string())),
            None => Err(ApiError::Unauthorized(format!(
                "Missing {USER_ID_HEADER} header"
            ))),
        }
    }
}
