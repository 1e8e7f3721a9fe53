use std::sync::Arc;

use attendance_core::models::time_window::{
    AddTimeWindowsRequest, OwnedTimeWindow, TimeRange, TimeWindow,
};
use axum::extract::State;
use uuid::Uuid;

use super::{created, listed, ok, ApiResult};
use crate::{
    middleware::{
        auth::AuthUser,
        extract::{Json, Path},
    },
    ApiState,
};

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn show_times(
    State(state): State<Arc<ApiState>>,
    _user: AuthUser,
    Path(room_id): Path<Uuid>,
) -> ApiResult<Vec<TimeWindow>> {
    let windows = state.services.schedule.find_by_room(room_id).await?;
    Ok(listed("Get time successfully", windows))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn add_times(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<AddTimeWindowsRequest>,
) -> ApiResult<Vec<TimeWindow>> {
    let windows = state
        .services
        .schedule
        .insert_batch(user.id(), room_id, payload.time)
        .await?;

    Ok(created("Add time successfully", windows))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn get_time(
    State(state): State<Arc<ApiState>>,
    _user: AuthUser,
    Path(time_id): Path<Uuid>,
) -> ApiResult<OwnedTimeWindow> {
    let window = state.services.schedule.find_by_id(time_id).await?;
    Ok(ok("Get time successfully", window))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn update_time(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(time_id): Path<Uuid>,
    Json(payload): Json<TimeRange>,
) -> ApiResult<TimeWindow> {
    let window = state
        .services
        .schedule
        .update(user.id(), time_id, payload)
        .await?;

    Ok(created("Update time successfully", window))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn delete_time(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(time_id): Path<Uuid>,
) -> ApiResult<Uuid> {
    state.services.schedule.delete(user.id(), time_id).await?;
    Ok(ok("Delete time successfully", time_id))
}
