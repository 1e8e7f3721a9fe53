use std::sync::Arc;

use attendance_core::models::attendance::AttendanceEntry;
use axum::extract::State;
use chrono::Utc;
use uuid::Uuid;

use super::{created, ApiResult};
use crate::{
    middleware::{auth::AuthUser, client_ip::ClientIp, extract::Path},
    ApiState,
};

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn check_in(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    ClientIp(ip): ClientIp,
    Path(room_id): Path<Uuid>,
) -> ApiResult<AttendanceEntry> {
    let entry = state
        .services
        .attendance
        .check_in(user.id(), room_id, &ip, Utc::now())
        .await?;

    Ok(created("Check in successfully", entry))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn check_out(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    ClientIp(ip): ClientIp,
    Path(room_id): Path<Uuid>,
) -> ApiResult<AttendanceEntry> {
    let entry = state
        .services
        .attendance
        .check_out(user.id(), room_id, &ip, Utc::now())
        .await?;

    Ok(created("Check out successfully", entry))
}
