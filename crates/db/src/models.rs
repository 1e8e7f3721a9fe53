use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use attendance_core::models::{
    attendance::AttendanceEntry, room::Room, time_window::TimeWindow, user::User,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRoom {
    pub id: Uuid,
    pub name: String,
    pub allowed_ip: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl DbRoom {
    pub fn into_room(self, member_ids: Vec<Uuid>) -> Room {
        Room {
            id: self.id,
            name: self.name,
            allowed_ip: self.allowed_ip,
            owner_id: self.owner_id,
            member_ids,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRoomMember {
    pub room_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeWindow {
    pub id: Uuid,
    pub room_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<DbTimeWindow> for TimeWindow {
    fn from(row: DbTimeWindow) -> Self {
        TimeWindow {
            id: row.id,
            room_id: row.room_id,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAttendanceEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub time_window_id: Option<Uuid>,
    pub attendance_day: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub is_late_arrival: bool,
    pub is_leave_early: bool,
}

impl From<DbAttendanceEntry> for AttendanceEntry {
    fn from(row: DbAttendanceEntry) -> Self {
        AttendanceEntry {
            id: row.id,
            user_id: row.user_id,
            room_id: row.room_id,
            time_window_id: row.time_window_id,
            attendance_day: row.attendance_day,
            check_in: row.check_in,
            check_out: row.check_out,
            is_late_arrival: row.is_late_arrival,
            is_leave_early: row.is_leave_early,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

impl From<DbUser> for User {
    fn from(row: DbUser) -> Self {
        User {
            id: row.id,
            firstname: row.firstname,
            lastname: row.lastname,
            email: row.email,
        }
    }
}
