use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/attendance/checkin/:room_id", post(handlers::attendance::check_in))
        .route("/attendance/checkout/:room_id", post(handlers::attendance::check_out))
}
