//! In-process backend used by tests and local runs without Postgres.
//!
//! Keeps the same guarantees as [`PgStore`](crate::PgStore): window writes are
//! checked for overlap under the write lock and attendance check-in is a
//! conditional insert on `(user, room, day)`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
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

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    rooms: HashMap<Uuid, Room>,
    windows: HashMap<Uuid, TimeWindow>,
    entries: HashMap<Uuid, AttendanceEntry>,
}

impl State {
    fn room_windows(&self, room_id: Uuid) -> impl Iterator<Item = &TimeWindow> {
        self.windows.values().filter(move |w| w.room_id == room_id)
    }

    /// Rejects the batch if any window is unordered or collides with a stored
    /// window (other than `exclude`) or with an earlier window of the batch.
    fn check_batch(
        &self,
        room_id: Uuid,
        batch: &[TimeRange],
        exclude: Option<Uuid>,
    ) -> AttendanceResult<()> {
        for (i, range) in batch.iter().enumerate() {
            if !range.is_ordered() {
                return Err(AttendanceError::Validation(
                    messages::START_BEFORE_END.to_string(),
                ));
            }
            let stored = self
                .room_windows(room_id)
                .filter(|w| Some(w.id) != exclude)
                .any(|w| w.range().overlaps(range));
            let in_batch = batch[..i].iter().any(|other| other.overlaps(range));
            if stored || in_batch {
                return Err(AttendanceError::Validation(
                    messages::OVERLAPPING_TIME.to_string(),
                ));
            }
        }
        Ok(())
    }

    fn insert_windows(&mut self, room_id: Uuid, batch: Vec<TimeRange>) -> Vec<TimeWindow> {
        let now = Utc::now();
        batch
            .into_iter()
            .map(|range| {
                let window = TimeWindow {
                    id: Uuid::new_v4(),
                    room_id,
                    start_time: range.start_time,
                    end_time: range.end_time,
                    created_at: now,
                };
                self.windows.insert(window.id, window.clone());
                window
            })
            .collect()
    }
}

fn newest_first(mut entries: Vec<AttendanceEntry>) -> Vec<AttendanceEntry> {
    entries.sort_by(|a, b| b.check_in.cmp(&a.check_in));
    entries
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Users are provisioned outside this service; tests seed them here.
    pub async fn insert_user(&self, user: User) {
        self.state.write().await.users.insert(user.id, user);
    }
}

#[async_trait]
impl RoomStore for MemoryStore {
    async fn create_room(
        &self,
        room: NewRoom,
        windows: Vec<TimeRange>,
    ) -> AttendanceResult<(Room, Vec<TimeWindow>)> {
        let mut state = self.state.write().await;
        let id = Uuid::new_v4();
        state.check_batch(id, &windows, None)?;

        let room = Room {
            id,
            name: room.name,
            allowed_ip: room.allowed_ip,
            owner_id: room.owner_id,
            member_ids: Vec::new(),
            created_at: Utc::now(),
        };
        state.rooms.insert(id, room.clone());
        let inserted = state.insert_windows(id, windows);

        Ok((room, inserted))
    }

    async fn find_room(&self, room_id: Uuid) -> AttendanceResult<Option<Room>> {
        Ok(self.state.read().await.rooms.get(&room_id).cloned())
    }

    async fn add_member(&self, room_id: Uuid, user_id: Uuid) -> AttendanceResult<bool> {
        let mut state = self.state.write().await;
        let room = state
            .rooms
            .get_mut(&room_id)
            .ok_or_else(|| AttendanceError::NotFound(messages::ROOM_NOT_FOUND.to_string()))?;

        if room.member_ids.contains(&user_id) {
            return Ok(false);
        }
        room.member_ids.push(user_id);
        Ok(true)
    }
}

#[async_trait]
impl TimeWindowStore for MemoryStore {
    async fn insert_batch(
        &self,
        room_id: Uuid,
        windows: Vec<TimeRange>,
    ) -> AttendanceResult<Vec<TimeWindow>> {
        let mut state = self.state.write().await;
        state.check_batch(room_id, &windows, None)?;
        Ok(state.insert_windows(room_id, windows))
    }

    async fn find_by_room(&self, room_id: Uuid) -> AttendanceResult<Vec<TimeWindow>> {
        let state = self.state.read().await;
        let mut windows: Vec<TimeWindow> = state.room_windows(room_id).cloned().collect();
        windows.sort_by_key(|w| w.start_time);
        Ok(windows)
    }

    async fn find_by_id(&self, window_id: Uuid) -> AttendanceResult<Option<TimeWindow>> {
        Ok(self.state.read().await.windows.get(&window_id).cloned())
    }

    async fn update(
        &self,
        window_id: Uuid,
        range: TimeRange,
    ) -> AttendanceResult<Option<TimeWindow>> {
        let mut state = self.state.write().await;
        let Some(room_id) = state.windows.get(&window_id).map(|w| w.room_id) else {
            return Ok(None);
        };
        state.check_batch(room_id, &[range], Some(window_id))?;

        let window = state.windows.get_mut(&window_id).map(|window| {
            window.start_time = range.start_time;
            window.end_time = range.end_time;
            window.clone()
        });
        Ok(window)
    }

    async fn delete(&self, window_id: Uuid) -> AttendanceResult<bool> {
        Ok(self.state.write().await.windows.remove(&window_id).is_some())
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn find_for_day(
        &self,
        user_id: Uuid,
        room_id: Uuid,
        day: NaiveDate,
    ) -> AttendanceResult<Option<AttendanceEntry>> {
        let state = self.state.read().await;
        Ok(state
            .entries
            .values()
            .find(|e| e.user_id == user_id && e.room_id == room_id && e.attendance_day == day)
            .cloned())
    }

    async fn insert_if_absent(
        &self,
        entry: NewAttendanceEntry,
    ) -> AttendanceResult<Option<AttendanceEntry>> {
        let mut state = self.state.write().await;
        let exists = state.entries.values().any(|e| {
            e.user_id == entry.user_id
                && e.room_id == entry.room_id
                && e.attendance_day == entry.attendance_day
        });
        if exists {
            return Ok(None);
        }

        let created = AttendanceEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            room_id: entry.room_id,
            time_window_id: entry.time_window_id,
            attendance_day: entry.attendance_day,
            check_in: Some(entry.check_in),
            check_out: None,
            is_late_arrival: entry.is_late_arrival,
            is_leave_early: false,
        };
        state.entries.insert(created.id, created.clone());
        Ok(Some(created))
    }

    async fn record_check_out(
        &self,
        entry_id: Uuid,
        check_out: DateTime<Utc>,
        is_leave_early: bool,
    ) -> AttendanceResult<AttendanceEntry> {
        let mut state = self.state.write().await;
        let entry = state.entries.get_mut(&entry_id).ok_or_else(|| {
            AttendanceError::NotFound(format!("Attendance entry {entry_id} not found"))
        })?;
        entry.check_out = Some(check_out);
        entry.is_leave_early = is_leave_early;
        Ok(entry.clone())
    }

    async fn find_by_room_between(
        &self,
        room_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AttendanceResult<Vec<AttendanceEntry>> {
        let state = self.state.read().await;
        let mut entries: Vec<AttendanceEntry> = state
            .entries
            .values()
            .filter(|e| e.room_id == room_id)
            .filter(|e| e.check_in.is_some_and(|at| at >= from && at < to))
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.check_in);
        Ok(entries)
    }

    async fn find_by_room(&self, room_id: Uuid) -> AttendanceResult<Vec<AttendanceEntry>> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .entries
                .values()
                .filter(|e| e.room_id == room_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_user(&self, user_id: Uuid) -> AttendanceResult<Vec<AttendanceEntry>> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .entries
                .values()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> AttendanceResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .cloned())
    }

    async fn find_many(&self, user_ids: Vec<Uuid>) -> AttendanceResult<Vec<User>> {
        let state = self.state.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}
