//! # Authentication Module
//!
//! Authentication itself happens upstream. The gateway in front of this
//! service verifies the caller and forwards the user id in the
//! [`USER_ID_HEADER`] header; handlers receive it through the [`AuthUser`]
//! extractor.

use async_trait::async_trait;
use attendance_core::errors::AttendanceError;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use super::error_handling::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0
    }
}

/// Reads and parses the forwarded user id.
pub fn user_id_from_parts(parts: &Parts) -> Result<Uuid, AttendanceError> {
    let value = parts
        .headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| AttendanceError::Authentication("Missing user identity".to_string()))?;

    value
        .to_str()
        .ok()
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .ok_or_else(|| AttendanceError::Authentication("Invalid user identity".to_string()))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AuthUser(user_id_from_parts(parts)?))
    }
}
