use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticQuery {
    pub room_id: Uuid,
    pub month: u32,
    pub year: i32,
}

/// Work-time figures of one user in one room over one calendar month.
///
/// All durations are in hours. Computed on read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyWorkStatistic {
    pub user_id: Uuid,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub room_id: Uuid,
    pub month: u32,
    pub year: i32,
    pub number_of_attendances: usize,
    pub late_arrival_count: usize,
    pub leave_early_count: usize,
    pub standard_work_hours_per_month: f64,
    pub total_arrival_early_hours: f64,
    pub total_arrival_late_hours: f64,
    pub total_departure_early_hours: f64,
    pub total_departure_late_hours: f64,
    pub total_time_work_hours_per_month: f64,
}
