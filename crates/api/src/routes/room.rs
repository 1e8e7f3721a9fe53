use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/room/create", post(handlers::room::create_room))
        .route("/room/:room_id", get(handlers::room::get_room))
        .route("/room/add-member/:room_id", post(handlers::room::add_member))
}
