//! # Attendance Ledger
//!
//! Records one entry per (user, room, calendar day) and walks it through
//! `NoEntry -> CheckedIn -> CheckedOut`.
//!
//! Check-in preconditions, in order:
//!
//! 1. the room exists
//! 2. the caller's observed address equals the room's `allowed_ip`
//! 3. the caller is a member of the room
//! 4. no entry exists yet for today
//! 5. the room has a window scheduled today
//!
//! Check-out requires the same network gate, a checked-in entry for today that
//! has not been checked out, and a window on the entry's day.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    calendar::Calendar,
    errors::{AttendanceError, AttendanceResult},
    matcher, messages,
    models::{
        attendance::{AttendanceEntry, AttendanceRecord, AttendanceState, NewAttendanceEntry},
        room::Room,
        time_window::TimeWindow,
    },
};

use super::ServiceContext;

#[derive(Clone)]
pub struct AttendanceLedger {
    ctx: ServiceContext,
}

impl AttendanceLedger {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// The calendar check events are assigned to days with.
    pub fn calendar(&self) -> &Calendar {
        &self.ctx.calendar
    }

    pub async fn check_in(
        &self,
        user_id: Uuid,
        room_id: Uuid,
        client_ip: &str,
        at: DateTime<Utc>,
    ) -> AttendanceResult<AttendanceEntry> {
        let room = self.ctx.room(room_id).await?;
        ensure_network(&room, client_ip)?;
        if !room.has_member(user_id) {
            return Err(AttendanceError::Forbidden(messages::NOT_A_MEMBER.to_string()));
        }

        let day = self.ctx.calendar.day_of(at);
        let existing = self
            .ctx
            .io(
                "find_attendance_for_day",
                self.ctx.stores.attendance.find_for_day(user_id, room_id, day),
            )
            .await?;
        if existing.is_some() {
            return Err(AttendanceError::Conflict(messages::ALREADY_CHECKED_IN.to_string()));
        }

        let windows = self.windows(room_id).await?;
        let window = matcher::match_window(&windows, at, &self.ctx.calendar)
            .ok_or_else(|| AttendanceError::Forbidden(messages::NO_SCHEDULE_TODAY.to_string()))?;

        let new_entry = NewAttendanceEntry {
            user_id,
            room_id,
            time_window_id: Some(window.id),
            attendance_day: day,
            check_in: at,
            is_late_arrival: matcher::is_late_arrival(at, window),
        };
        // A concurrent check-in may win between the lookup and this write.
        let entry = self
            .ctx
            .io("insert_attendance", self.ctx.stores.attendance.insert_if_absent(new_entry))
            .await?
            .ok_or_else(|| AttendanceError::Conflict(messages::ALREADY_CHECKED_IN.to_string()))?;

        info!(
            %user_id,
            %room_id,
            late = entry.is_late_arrival,
            "checked in"
        );
        Ok(entry)
    }

    pub async fn check_out(
        &self,
        user_id: Uuid,
        room_id: Uuid,
        client_ip: &str,
        at: DateTime<Utc>,
    ) -> AttendanceResult<AttendanceEntry> {
        let room = self.ctx.room(room_id).await?;
        ensure_network(&room, client_ip)?;

        let day = self.ctx.calendar.day_of(at);
        let entry = self
            .ctx
            .io(
                "find_attendance_for_day",
                self.ctx.stores.attendance.find_for_day(user_id, room_id, day),
            )
            .await?
            .filter(|entry| entry.check_in.is_some())
            .ok_or_else(|| AttendanceError::Validation(messages::NOT_CHECKED_IN.to_string()))?;

        if entry.state() == Some(AttendanceState::CheckedOut) {
            return Err(AttendanceError::Conflict(messages::ALREADY_CHECKED_OUT.to_string()));
        }

        let windows = self.windows(room_id).await?;
        let window = matcher::match_day(&windows, entry.attendance_day, &self.ctx.calendar)
            .ok_or_else(|| AttendanceError::Forbidden(messages::NO_SCHEDULE_TODAY.to_string()))?;

        let is_leave_early = matcher::is_leave_early(at, window);
        let entry = self
            .ctx
            .io(
                "record_check_out",
                self.ctx.stores.attendance.record_check_out(entry.id, at, is_leave_early),
            )
            .await?;

        info!(%user_id, %room_id, early = entry.is_leave_early, "checked out");
        Ok(entry)
    }

    /// Every entry of `user_id`, across rooms, newest first.
    pub async fn my_history(&self, user_id: Uuid) -> AttendanceResult<Vec<AttendanceRecord>> {
        let entries = self
            .ctx
            .io("find_attendance_by_user", self.ctx.stores.attendance.find_by_user(user_id))
            .await?;
        self.with_names(entries).await
    }

    /// Every entry recorded in a room, newest first.
    pub async fn history_by_room(&self, room_id: Uuid) -> AttendanceResult<Vec<AttendanceRecord>> {
        self.ctx.room(room_id).await?;
        let entries = self
            .ctx
            .io("find_attendance_by_room", self.ctx.stores.attendance.find_by_room(room_id))
            .await?;
        self.with_names(entries).await
    }

    /// One user's entries within a room, newest first.
    pub async fn history_of_user(
        &self,
        room_id: Uuid,
        user_id: Uuid,
    ) -> AttendanceResult<Vec<AttendanceRecord>> {
        self.ctx.room(room_id).await?;
        let entries = self
            .ctx
            .io("find_attendance_by_room", self.ctx.stores.attendance.find_by_room(room_id))
            .await?
            .into_iter()
            .filter(|entry| entry.user_id == user_id)
            .collect();
        self.with_names(entries).await
    }

    async fn windows(&self, room_id: Uuid) -> AttendanceResult<Vec<TimeWindow>> {
        self.ctx
            .io("find_windows_by_room", self.ctx.stores.windows.find_by_room(room_id))
            .await
    }

    /// Attaches room and user names with explicit second lookups.
    async fn with_names(&self, entries: Vec<AttendanceEntry>) -> AttendanceResult<Vec<AttendanceRecord>> {
        let user_ids: Vec<Uuid> = entries
            .iter()
            .map(|e| e.user_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let users: HashMap<Uuid, _> = self
            .ctx
            .io("find_users", self.ctx.stores.users.find_many(user_ids))
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let mut room_names: HashMap<Uuid, Option<String>> = HashMap::new();
        for room_id in entries.iter().map(|e| e.room_id) {
            if room_names.contains_key(&room_id) {
                continue;
            }
            let room = self
                .ctx
                .io("find_room", self.ctx.stores.rooms.find_room(room_id))
                .await?;
            room_names.insert(room_id, room.map(|r| r.name));
        }

        debug!(count = entries.len(), "attendance history resolved");

        Ok(entries
            .into_iter()
            .map(|entry| {
                let user = users.get(&entry.user_id);
                AttendanceRecord {
                    room_name: room_names.get(&entry.room_id).cloned().flatten(),
                    firstname: user.map(|u| u.firstname.clone()),
                    lastname: user.map(|u| u.lastname.clone()),
                    entry,
                }
            })
            .collect())
    }
}

fn ensure_network(room: &Room, client_ip: &str) -> AttendanceResult<()> {
    if room.allows_ip(client_ip) {
        Ok(())
    } else {
        Err(AttendanceError::Forbidden(messages::IP_NOT_ALLOWED.to_string()))
    }
}
