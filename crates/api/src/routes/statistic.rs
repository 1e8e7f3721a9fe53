use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/statistic/history-me", get(handlers::statistic::history_me))
        .route(
            "/statistic/attendance-by-room/:room_id",
            get(handlers::statistic::attendance_by_room),
        )
        .route(
            "/statistic/find-by-user/:room_id/:user_id",
            get(handlers::statistic::find_by_user),
        )
        .route(
            "/statistic/time-work-by-month",
            get(handlers::statistic::time_work_by_month),
        )
}
