//! # Store Traits
//!
//! The persistence seams of the service. Each collection gets its own trait so
//! backends and test doubles can be swapped per concern.
//!
//! Backends must uphold two guarantees the services rely on:
//!
//! - window writes for a room are atomic and never leave two windows of that
//!   room overlapping, even under concurrent writers; a lost race surfaces as
//!   a validation error carrying [`messages::OVERLAPPING_TIME`]
//! - [`AttendanceStore::insert_if_absent`] is a single conditional write on
//!   `(user, room, day)`
//!
//! [`messages::OVERLAPPING_TIME`]: crate::messages::OVERLAPPING_TIME

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    errors::AttendanceResult,
    models::{
        attendance::{AttendanceEntry, NewAttendanceEntry},
        room::{NewRoom, Room},
        time_window::{TimeRange, TimeWindow},
        user::User,
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Creates the room and its initial windows in one unit of work.
    async fn create_room(
        &self,
        room: NewRoom,
        windows: Vec<TimeRange>,
    ) -> AttendanceResult<(Room, Vec<TimeWindow>)>;

    async fn find_room(&self, room_id: Uuid) -> AttendanceResult<Option<Room>>;

    /// Returns `false` when the user already was a member.
    async fn add_member(&self, room_id: Uuid, user_id: Uuid) -> AttendanceResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimeWindowStore: Send + Sync {
    /// Inserts every window or none of them.
    async fn insert_batch(
        &self,
        room_id: Uuid,
        windows: Vec<TimeRange>,
    ) -> AttendanceResult<Vec<TimeWindow>>;

    /// Windows of a room ordered by `start_time`.
    async fn find_by_room(&self, room_id: Uuid) -> AttendanceResult<Vec<TimeWindow>>;

    async fn find_by_id(&self, window_id: Uuid) -> AttendanceResult<Option<TimeWindow>>;

    async fn update(
        &self,
        window_id: Uuid,
        range: TimeRange,
    ) -> AttendanceResult<Option<TimeWindow>>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, window_id: Uuid) -> AttendanceResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn find_for_day(
        &self,
        user_id: Uuid,
        room_id: Uuid,
        day: NaiveDate,
    ) -> AttendanceResult<Option<AttendanceEntry>>;

    /// Inserts the entry unless one exists for the same (user, room, day).
    /// Returns `None` when an entry was already there.
    async fn insert_if_absent(
        &self,
        entry: NewAttendanceEntry,
    ) -> AttendanceResult<Option<AttendanceEntry>>;

    async fn record_check_out(
        &self,
        entry_id: Uuid,
        check_out: DateTime<Utc>,
        is_leave_early: bool,
    ) -> AttendanceResult<AttendanceEntry>;

    /// Entries of a room with `check_in` in `[from, to)`.
    async fn find_by_room_between(
        &self,
        room_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AttendanceResult<Vec<AttendanceEntry>>;

    /// Newest first.
    async fn find_by_room(&self, room_id: Uuid) -> AttendanceResult<Vec<AttendanceEntry>>;

    /// Newest first.
    async fn find_by_user(&self, user_id: Uuid) -> AttendanceResult<Vec<AttendanceEntry>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AttendanceResult<Option<User>>;

    async fn find_many(&self, user_ids: Vec<Uuid>) -> AttendanceResult<Vec<User>>;
}

/// Handles to every store the services need.
#[derive(Clone)]
pub struct Stores {
    pub rooms: Arc<dyn RoomStore>,
    pub windows: Arc<dyn TimeWindowStore>,
    pub attendance: Arc<dyn AttendanceStore>,
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    /// Uses one backend for every collection.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: RoomStore + TimeWindowStore + AttendanceStore + UserStore + 'static,
    {
        Self {
            rooms: backend.clone(),
            windows: backend.clone(),
            attendance: backend.clone(),
            users: backend,
        }
    }
}
