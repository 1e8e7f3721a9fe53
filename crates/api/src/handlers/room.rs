use std::sync::Arc;

use attendance_core::models::room::{
    AddMemberRequest, CreateRoomRequest, CreateRoomResponse, Room, RoomDetail,
};
use axum::extract::State;
use uuid::Uuid;

use super::{created, ok, ApiResult};
use crate::{
    middleware::{
        auth::AuthUser,
        client_ip::ClientIp,
        extract::{Json, Path},
    },
    ApiState,
};

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn create_room(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    ClientIp(ip): ClientIp,
    Json(payload): Json<CreateRoomRequest>,
) -> ApiResult<CreateRoomResponse> {
    let room = state
        .services
        .rooms
        .create_room(user.id(), payload, &ip)
        .await?;

    Ok(created("Create room successfully", room))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn get_room(
    State(state): State<Arc<ApiState>>,
    _user: AuthUser,
    Path(room_id): Path<Uuid>,
) -> ApiResult<RoomDetail> {
    let room = state.services.rooms.get_room(room_id).await?;
    Ok(ok("Get room successfully", room))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn add_member(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> ApiResult<Room> {
    let room = state
        .services
        .rooms
        .add_member(user.id(), room_id, &payload.email)
        .await?;

    Ok(created("Add member successfully", room))
}
