use std::collections::HashMap;

use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{AttendanceError, AttendanceResult},
    messages,
    models::room::{CreateRoomRequest, CreateRoomResponse, NewRoom, Room, RoomDetail},
    validator,
};

use super::ServiceContext;

#[derive(Clone)]
pub struct RoomService {
    ctx: ServiceContext,
}

impl RoomService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Creates a room owned by `actor` together with its initial windows.
    ///
    /// The windows are validated as one batch; when any of them is rejected
    /// the room is not created either. Without an explicit `allowed_ip` the
    /// caller's observed address becomes the room's check-in gate.
    pub async fn create_room(
        &self,
        actor: Uuid,
        request: CreateRoomRequest,
        observed_ip: &str,
    ) -> AttendanceResult<CreateRoomResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AttendanceError::Validation("Room name is required".to_string()));
        }

        validator::ensure_valid(&request.time, &[], None)?;

        let allowed_ip = request
            .allowed_ip
            .as_deref()
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .unwrap_or(observed_ip)
            .to_string();

        let new_room = NewRoom {
            name: name.to_string(),
            allowed_ip,
            owner_id: actor,
        };
        let (room, time) = self
            .ctx
            .io("create_room", self.ctx.stores.rooms.create_room(new_room, request.time))
            .await?;

        info!(room_id = %room.id, owner_id = %actor, windows = time.len(), "room created");

        Ok(CreateRoomResponse {
            id: room.id,
            name: room.name,
            allowed_ip: room.allowed_ip,
            owner_id: room.owner_id,
            time,
            created_at: room.created_at,
        })
    }

    /// The room with owner, members and windows looked up explicitly.
    pub async fn get_room(&self, room_id: Uuid) -> AttendanceResult<RoomDetail> {
        let room = self.ctx.room(room_id).await?;
        let time = self
            .ctx
            .io("find_windows_by_room", self.ctx.stores.windows.find_by_room(room_id))
            .await?;

        let mut ids = room.member_ids.clone();
        ids.push(room.owner_id);
        let users: HashMap<Uuid, _> = self
            .ctx
            .io("find_users", self.ctx.stores.users.find_many(ids))
            .await?
            .into_iter()
            .map(|user| (user.id, user.summary()))
            .collect();

        Ok(RoomDetail {
            id: room.id,
            name: room.name,
            allowed_ip: room.allowed_ip,
            owner: users.get(&room.owner_id).cloned(),
            members: room
                .member_ids
                .iter()
                .filter_map(|id| users.get(id).cloned())
                .collect(),
            time,
            created_at: room.created_at,
        })
    }

    /// Adds the user registered under `email` to the room. Owner only.
    pub async fn add_member(&self, actor: Uuid, room_id: Uuid, email: &str) -> AttendanceResult<Room> {
        let mut room = self.ctx.room(room_id).await?;
        if !room.is_owned_by(actor) {
            return Err(AttendanceError::Forbidden(messages::NOT_ROOM_OWNER.to_string()));
        }

        let user = self
            .ctx
            .io("find_user_by_email", self.ctx.stores.users.find_by_email(email.trim()))
            .await?
            .ok_or_else(|| AttendanceError::Validation(messages::INVALID_EMAIL.to_string()))?;

        if room.has_member(user.id) {
            return Err(AttendanceError::Validation(messages::ALREADY_MEMBER.to_string()));
        }

        let added = self
            .ctx
            .io("add_member", self.ctx.stores.rooms.add_member(room_id, user.id))
            .await?;
        if !added {
            return Err(AttendanceError::Validation(messages::ALREADY_MEMBER.to_string()));
        }

        info!(%room_id, user_id = %user.id, "member added");
        room.member_ids.push(user.id);
        Ok(room)
    }
}
