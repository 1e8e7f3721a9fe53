use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a (user, room, day) entry sits in its lifecycle.
///
/// The absence of an entry is the implicit `NoEntry` state; there is no way
/// back from `CheckedOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceState {
    CheckedIn,
    CheckedOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
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

impl AttendanceEntry {
    pub fn state(&self) -> Option<AttendanceState> {
        match (self.check_in, self.check_out) {
            (_, Some(_)) => Some(AttendanceState::CheckedOut),
            (Some(_), None) => Some(AttendanceState::CheckedIn),
            (None, None) => None,
        }
    }
}

/// A check-in about to be written; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendanceEntry {
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub time_window_id: Option<Uuid>,
    pub attendance_day: NaiveDate,
    pub check_in: DateTime<Utc>,
    pub is_late_arrival: bool,
}

/// An entry joined with the names of its room and user, for history listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(flatten)]
    pub entry: AttendanceEntry,
    pub room_name: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}
