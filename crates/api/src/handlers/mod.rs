pub mod attendance;
pub mod room;
pub mod statistic;
pub mod time;

use attendance_core::models::response::ApiResponse;
use axum::{http::StatusCode, Json};

use crate::middleware::error_handling::AppError;

pub type Reply<T> = (StatusCode, Json<ApiResponse<T>>);
pub type ApiResult<T> = Result<Reply<T>, AppError>;

pub(crate) fn ok<T>(message: &str, data: T) -> Reply<T> {
    reply(StatusCode::OK, message, data)
}

pub(crate) fn created<T>(message: &str, data: T) -> Reply<T> {
    reply(StatusCode::CREATED, message, data)
}

/// A listing with `numberOfRecords` filled in.
pub(crate) fn listed<T>(message: &str, data: Vec<T>) -> Reply<Vec<T>> {
    let count = data.len();
    let body = ApiResponse::success(StatusCode::OK.as_u16(), message, Some(data)).with_records(count);
    (StatusCode::OK, Json(body))
}

fn reply<T>(status: StatusCode, message: &str, data: T) -> Reply<T> {
    (
        status,
        Json(ApiResponse::success(status.as_u16(), message, Some(data))),
    )
}
