//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and renders them in the same
//! response envelope successful calls use, so clients only ever parse one
//! shape.

use attendance_core::{errors::AttendanceError, models::response::ApiResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// Wraps an [`AttendanceError`] so handlers can return `Result<_, AppError>`
/// and use `?` on service calls.
///
/// # Example
///
/// ```
/// use attendance_api::middleware::error_handling::AppError;
/// use attendance_core::errors::AttendanceError;
///
/// fn lookup(found: bool) -> Result<&'static str, AppError> {
///     if !found {
///         return Err(AttendanceError::NotFound("Room is not found".into()).into());
///     }
///     Ok("room")
/// }
/// # fn main() { assert!(lookup(false).is_err()); }
/// ```
#[derive(Debug)]
pub struct AppError(pub AttendanceError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AttendanceError::NotFound(_) => StatusCode::NOT_FOUND,
            AttendanceError::Validation(_) => StatusCode::BAD_REQUEST,
            AttendanceError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AttendanceError::Forbidden(_) => StatusCode::FORBIDDEN,
            AttendanceError::Conflict(_) => StatusCode::BAD_REQUEST,
            AttendanceError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            AttendanceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AttendanceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Store failures are logged in full and reported generically.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = ?self.0, "request failed");
            "Internal server error".to_string()
        } else {
            self.0.message()
        };

        let body = ApiResponse::<()>::failure(status.as_u16(), message);
        (status, Json(body)).into_response()
    }
}

impl From<AttendanceError> for AppError {
    fn from(err: AttendanceError) -> Self {
        AppError(err)
    }
}
