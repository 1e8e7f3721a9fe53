use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A proposed `[start_time, end_time)` interval, not yet attached to a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self { start_time, end_time }
    }

    pub fn is_ordered(&self) -> bool {
        self.start_time < self.end_time
    }

    /// Half-open intervals overlap unless one ends before the other starts.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        !(self.end_time <= other.start_time || self.start_time >= other.end_time)
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub id: Uuid,
    pub room_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl TimeWindow {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    pub fn duration(&self) -> Duration {
        self.range().duration()
    }
}

/// A window together with the owner of the room it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedTimeWindow {
    #[serde(flatten)]
    pub window: TimeWindow,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTimeWindowsRequest {
    pub time: Vec<TimeRange>,
}

