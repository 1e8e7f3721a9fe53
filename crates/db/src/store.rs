use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use attendance_core::{
    errors::{AttendanceError, AttendanceResult},
    messages,
    models::{
        attendance::{AttendanceEntry, NewAttendanceEntry},
        room::{NewRoom, Room},
        time_window::{TimeRange, TimeWindow},
        user::User,
    },
    store::{AttendanceStore, RoomStore, TimeWindowStore, UserStore},
};

use crate::{repositories, DbPool};

const EXCLUSION_VIOLATION: &str = "23P01";
const CHECK_VIOLATION: &str = "23514";
const UNIQUE_VIOLATION: &str = "23505";

const ONE_ENTRY_PER_DAY: &str = "one_entry_per_day";
const ROOM_MEMBERS_KEY: &str = "room_members_pkey";

/// Postgres backend for every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load_room(&self, room: crate::models::DbRoom) -> AttendanceResult<Room> {
        let members = repositories::room::get_room_members(&self.pool, room.id)
            .await
            .map_err(store_error)?;
        Ok(room.into_room(members.into_iter().map(|m| m.user_id).collect()))
    }
}

/// Maps constraint violations back onto the domain errors they stand for.
fn store_error(report: eyre::Report) -> AttendanceError {
    if let Some(sqlx::Error::Database(db_err)) = report.downcast_ref::<sqlx::Error>() {
        match db_err.code().as_deref() {
            Some(EXCLUSION_VIOLATION) => {
                return AttendanceError::Validation(messages::OVERLAPPING_TIME.to_string());
            }
            Some(CHECK_VIOLATION) => {
                return AttendanceError::Validation(messages::START_BEFORE_END.to_string());
            }
            Some(UNIQUE_VIOLATION) => {
                return AttendanceError::Conflict(duplicate_message(db_err.constraint()));
            }
            _ => {}
        }
    }
    AttendanceError::Database(report)
}

fn duplicate_message(constraint: Option<&str>) -> String {
    match constraint {
        Some(ONE_ENTRY_PER_DAY) => messages::ALREADY_CHECKED_IN.to_string(),
        Some(ROOM_MEMBERS_KEY) => messages::ALREADY_MEMBER.to_string(),
        _ => "Record already exists".to_string(),
    }
}

#[async_trait]
impl RoomStore for PgStore {
    async fn create_room(
        &self,
        room: NewRoom,
        windows: Vec<TimeRange>,
    ) -> AttendanceResult<(Room, Vec<TimeWindow>)> {
        let (db_room, db_windows) = repositories::room::create_room(
            &self.pool,
            &room.name,
            &room.allowed_ip,
            room.owner_id,
            &windows,
        )
        .await
        .map_err(store_error)?;

        Ok((
            db_room.into_room(Vec::new()),
            db_windows.into_iter().map(TimeWindow::from).collect(),
        ))
    }

    async fn find_room(&self, room_id: Uuid) -> AttendanceResult<Option<Room>> {
        let room = repositories::room::get_room_by_id(&self.pool, room_id)
            .await
            .map_err(store_error)?;

        match room {
            Some(room) => Ok(Some(self.load_room(room).await?)),
            None => Ok(None),
        }
    }

    async fn add_member(&self, room_id: Uuid, user_id: Uuid) -> AttendanceResult<bool> {
        repositories::room::add_room_member(&self.pool, room_id, user_id)
            .await
            .map_err(store_error)
    }
}

#[async_trait]
impl TimeWindowStore for PgStore {
    async fn insert_batch(
        &self,
        room_id: Uuid,
        windows: Vec<TimeRange>,
    ) -> AttendanceResult<Vec<TimeWindow>> {
        let inserted = repositories::time_window::create_time_windows(&self.pool, room_id, &windows)
            .await
            .map_err(store_error)?;
        Ok(inserted.into_iter().map(TimeWindow::from).collect())
    }

    async fn find_by_room(&self, room_id: Uuid) -> AttendanceResult<Vec<TimeWindow>> {
        let windows = repositories::time_window::get_time_windows_by_room_id(&self.pool, room_id)
            .await
            .map_err(store_error)?;
        Ok(windows.into_iter().map(TimeWindow::from).collect())
    }

    async fn find_by_id(&self, window_id: Uuid) -> AttendanceResult<Option<TimeWindow>> {
        let window = repositories::time_window::get_time_window_by_id(&self.pool, window_id)
            .await
            .map_err(store_error)?;
        Ok(window.map(TimeWindow::from))
    }

    async fn update(
        &self,
        window_id: Uuid,
        range: TimeRange,
    ) -> AttendanceResult<Option<TimeWindow>> {
        let window = repositories::time_window::update_time_window(&self.pool, window_id, range)
            .await
            .map_err(store_error)?;
        Ok(window.map(TimeWindow::from))
    }

    async fn delete(&self, window_id: Uuid) -> AttendanceResult<bool> {
        repositories::time_window::delete_time_window(&self.pool, window_id)
            .await
            .map_err(store_error)
    }
}

#[async_trait]
impl AttendanceStore for PgStore {
    async fn find_for_day(
        &self,
        user_id: Uuid,
        room_id: Uuid,
        day: NaiveDate,
    ) -> AttendanceResult<Option<AttendanceEntry>> {
        let entry =
            repositories::attendance::get_attendance_for_day(&self.pool, user_id, room_id, day)
                .await
                .map_err(store_error)?;
        Ok(entry.map(AttendanceEntry::from))
    }

    async fn insert_if_absent(
        &self,
        entry: NewAttendanceEntry,
    ) -> AttendanceResult<Option<AttendanceEntry>> {
        let inserted = repositories::attendance::insert_attendance_if_absent(&self.pool, &entry)
            .await
            .map_err(store_error)?;
        Ok(inserted.map(AttendanceEntry::from))
    }

    async fn record_check_out(
        &self,
        entry_id: Uuid,
        check_out: DateTime<Utc>,
        is_leave_early: bool,
    ) -> AttendanceResult<AttendanceEntry> {
        let updated = repositories::attendance::update_check_out(
            &self.pool,
            entry_id,
            check_out,
            is_leave_early,
        )
        .await
        .map_err(store_error)?;
        Ok(updated.into())
    }

    async fn find_by_room_between(
        &self,
        room_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AttendanceResult<Vec<AttendanceEntry>> {
        let entries =
            repositories::attendance::get_attendance_by_room_between(&self.pool, room_id, from, to)
                .await
                .map_err(store_error)?;
        Ok(entries.into_iter().map(AttendanceEntry::from).collect())
    }

    async fn find_by_room(&self, room_id: Uuid) -> AttendanceResult<Vec<AttendanceEntry>> {
        let entries = repositories::attendance::get_attendance_by_room(&self.pool, room_id)
            .await
            .map_err(store_error)?;
        Ok(entries.into_iter().map(AttendanceEntry::from).collect())
    }

    async fn find_by_user(&self, user_id: Uuid) -> AttendanceResult<Vec<AttendanceEntry>> {
        let entries = repositories::attendance::get_attendance_by_user(&self.pool, user_id)
            .await
            .map_err(store_error)?;
        Ok(entries.into_iter().map(AttendanceEntry::from).collect())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> AttendanceResult<Option<User>> {
        let user = repositories::user::get_user_by_email(&self.pool, email)
            .await
            .map_err(store_error)?;
        Ok(user.map(User::from))
    }

    async fn find_many(&self, user_ids: Vec<Uuid>) -> AttendanceResult<Vec<User>> {
        let users = repositories::user::get_users_by_ids(&self.pool, &user_ids)
            .await
            .map_err(store_error)?;
        Ok(users.into_iter().map(User::from).collect())
    }
}
