//! Caller identity.
//!
//! Authentication happens upstream; the gateway forwards the authenticated user as the
//! `x-user-id` header (`user_7` or `7`).

use super::error::ApiError;
use crate::model::UserId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for CallerId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))?;
        header
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<UserId>().ok())
            .map(CallerId)
            .ok_or_else(|| ApiError::Unauthorized("Invalid user id".into()))
    }
}
