use std::sync::Arc;

use attendance_core::models::{
    attendance::AttendanceRecord,
    statistic::{MonthlyWorkStatistic, StatisticQuery},
};
use axum::extract::State;
use uuid::Uuid;

use super::{listed, ApiResult};
use crate::{
    middleware::{
        auth::AuthUser,
        extract::{Path, Query},
    },
    ApiState,
};

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn history_me(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> ApiResult<Vec<AttendanceRecord>> {
    let history = state.services.attendance.my_history(user.id()).await?;
    Ok(listed("Get history successfully", history))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn attendance_by_room(
    State(state): State<Arc<ApiState>>,
    _user: AuthUser,
    Path(room_id): Path<Uuid>,
) -> ApiResult<Vec<AttendanceRecord>> {
    let history = state.services.attendance.history_by_room(room_id).await?;
    Ok(listed("Get attendance successfully", history))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn find_by_user(
    State(state): State<Arc<ApiState>>,
    _user: AuthUser,
    Path((room_id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Vec<AttendanceRecord>> {
    let history = state
        .services
        .attendance
        .history_of_user(room_id, user_id)
        .await?;

    Ok(listed("Get attendance successfully", history))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn time_work_by_month(
    State(state): State<Arc<ApiState>>,
    _user: AuthUser,
    Query(query): Query<StatisticQuery>,
) -> ApiResult<Vec<MonthlyWorkStatistic>> {
    let ranked = state
        .services
        .statistics
        .statistics_for_month(query.room_id, query.month, query.year)
        .await?;

    Ok(listed("Get statistic successfully", ranked))
}
