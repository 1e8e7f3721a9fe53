//! The schedule store: owner-guarded writes of a room's time windows.

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    errors::{AttendanceError, AttendanceResult},
    messages,
    models::{
        room::Room,
        time_window::{OwnedTimeWindow, TimeRange, TimeWindow},
    },
    validator,
};

use super::ServiceContext;

#[derive(Clone)]
pub struct ScheduleService {
    ctx: ServiceContext,
}

impl ScheduleService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Adds windows to a room. The batch is validated as a unit against the
    /// room's stored windows and against itself; nothing is written unless
    /// every candidate passes.
    pub async fn insert_batch(
        &self,
        actor: Uuid,
        room_id: Uuid,
        windows: Vec<TimeRange>,
    ) -> AttendanceResult<Vec<TimeWindow>> {
        let room = self.ctx.room(room_id).await?;
        ensure_owner(&room, actor)?;

        if windows.is_empty() {
            return Ok(Vec::new());
        }

        let existing = self
            .ctx
            .io("find_windows_by_room", self.ctx.stores.windows.find_by_room(room_id))
            .await?;
        validator::ensure_valid(&windows, &existing, None)?;

        let inserted = self
            .ctx
            .io("insert_windows", self.ctx.stores.windows.insert_batch(room_id, windows))
            .await?;

        info!(%room_id, count = inserted.len(), "time windows added");
        Ok(inserted)
    }

    pub async fn find_by_room(&self, room_id: Uuid) -> AttendanceResult<Vec<TimeWindow>> {
        self.ctx.room(room_id).await?;
        self.ctx
            .io("find_windows_by_room", self.ctx.stores.windows.find_by_room(room_id))
            .await
    }

    /// Looks up a window and resolves the owner of its room.
    pub async fn find_by_id(&self, window_id: Uuid) -> AttendanceResult<OwnedTimeWindow> {
        let window = self
            .ctx
            .io("find_window", self.ctx.stores.windows.find_by_id(window_id))
            .await?
            .ok_or_else(|| AttendanceError::NotFound(messages::TIME_NOT_FOUND.to_string()))?;
        let room = self.ctx.room(window.room_id).await?;

        Ok(OwnedTimeWindow {
            window,
            owner_id: room.owner_id,
        })
    }

    /// Moves one window, revalidating it against its siblings.
    pub async fn update(
        &self,
        actor: Uuid,
        window_id: Uuid,
        range: TimeRange,
    ) -> AttendanceResult<TimeWindow> {
        let owned = self.find_by_id(window_id).await?;
        if owned.owner_id != actor {
            return Err(AttendanceError::Forbidden(messages::NOT_TIME_OWNER.to_string()));
        }

        let siblings = self
            .ctx
            .io(
                "find_windows_by_room",
                self.ctx.stores.windows.find_by_room(owned.window.room_id),
            )
            .await?;
        validator::ensure_valid(&[range], &siblings, Some(window_id))?;

        let updated = self
            .ctx
            .io("update_window", self.ctx.stores.windows.update(window_id, range))
            .await?
            .ok_or_else(|| AttendanceError::NotFound(messages::TIME_NOT_FOUND.to_string()))?;

        debug!(%window_id, "time window updated");
        Ok(updated)
    }

    pub async fn delete(&self, actor: Uuid, window_id: Uuid) -> AttendanceResult<()> {
        let owned = self.find_by_id(window_id).await?;
        if owned.owner_id != actor {
            return Err(AttendanceError::Forbidden(messages::NOT_TIME_OWNER.to_string()));
        }

        let deleted = self
            .ctx
            .io("delete_window", self.ctx.stores.windows.delete(window_id))
            .await?;
        if !deleted {
            return Err(AttendanceError::NotFound(messages::TIME_NOT_FOUND.to_string()));
        }

        debug!(%window_id, "time window deleted");
        Ok(())
    }
}

fn ensure_owner(room: &Room, actor: Uuid) -> AttendanceResult<()> {
    if room.is_owned_by(actor) {
        Ok(())
    } else {
        Err(AttendanceError::Forbidden(messages::NOT_TIME_OWNER.to_string()))
    }
}
