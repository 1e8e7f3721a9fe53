use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/time/show/:room_id", get(handlers::time::show_times))
        .route("/time/add-time/:room_id", post(handlers::time::add_times))
        .route(
            "/time/:time_id",
            get(handlers::time::get_time)
                .patch(handlers::time::update_time)
                .delete(handlers::time::delete_time),
        )
}
