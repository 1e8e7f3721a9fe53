use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{time_window::{TimeRange, TimeWindow}, user::UserSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub allowed_ip: String,
    pub owner_id: Uuid,
    pub member_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    pub fn has_member(&self, user_id: Uuid) -> bool {
        self.member_ids.contains(&user_id)
    }

    /// Exact string comparison, after trimming, against the observed client address.
    pub fn allows_ip(&self, client_ip: &str) -> bool {
        self.allowed_ip.trim() == client_ip.trim()
    }
}

/// Fields needed to persist a new room.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub name: String,
    pub allowed_ip: String,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub allowed_ip: Option<String>,
    #[serde(default)]
    pub time: Vec<TimeRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub id: Uuid,
    pub name: String,
    pub allowed_ip: String,
    pub owner_id: Uuid,
    pub time: Vec<TimeWindow>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMemberRequest {
    pub email: String,
}

/// A room with its owner, members and schedule resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetail {
    pub id: Uuid,
    pub name: String,
    pub allowed_ip: String,
    pub owner: Option<UserSummary>,
    pub members: Vec<UserSummary>,
    pub time: Vec<TimeWindow>,
    pub created_at: DateTime<Utc>,
}
