//! # Monthly Work Statistics
//!
//! Folds a month of attendance entries into per-user work-time figures.
//!
//! For every entry whose window can be resolved:
//!
//! - the window length counts towards the standard hours
//! - arriving before `start_time` counts as early arrival, after it as late arrival
//! - leaving before `end_time` counts as early departure, after it as late departure
//!
//! The net figure is `standard - (late arrival + early departure) + (early
//! arrival + late departure)`. Entries without a resolvable window are still
//! counted as attendances but contribute no hours.

use std::collections::{BTreeMap, HashMap};

use chrono::Duration;
use uuid::Uuid;

use crate::{
    calendar::Calendar,
    matcher::{self, Punctuality},
    models::{
        attendance::AttendanceEntry, statistic::MonthlyWorkStatistic, time_window::TimeWindow,
        user::User,
    },
};

/// Converts a duration to fractional hours, at millisecond precision.
pub fn hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 60000.0 / 60.0
}

#[derive(Debug, Default, Clone, PartialEq)]
struct WorkTally {
    attendances: usize,
    late_arrivals: usize,
    early_leaves: usize,
    standard: f64,
    arrival_early: f64,
    arrival_late: f64,
    departure_early: f64,
    departure_late: f64,
}

impl WorkTally {
    fn record(&mut self, entry: &AttendanceEntry, window: Option<&TimeWindow>) {
        self.attendances += 1;
        if entry.is_late_arrival {
            self.late_arrivals += 1;
        }
        if entry.is_leave_early {
            self.early_leaves += 1;
        }

        let Some(window) = window else {
            return;
        };
        self.standard += hours(window.duration());

        if let Some(check_in) = entry.check_in {
            match matcher::arrival(check_in, window) {
                Punctuality::Early(delta) => self.arrival_early += hours(delta),
                Punctuality::Late(delta) => self.arrival_late += hours(delta),
                Punctuality::OnTime => {}
            }
        }
        if let Some(check_out) = entry.check_out {
            match matcher::departure(check_out, window) {
                Punctuality::Early(delta) => self.departure_early += hours(delta),
                Punctuality::Late(delta) => self.departure_late += hours(delta),
                Punctuality::OnTime => {}
            }
        }
    }

    fn net_hours(&self) -> f64 {
        self.standard - (self.arrival_late + self.departure_early)
            + (self.arrival_early + self.departure_late)
    }
}

/// Builds the ranked statistics of one room for one month.
///
/// `entries` must already be limited to the room and month; `windows` are the
/// room's windows and `users` labels the output. The result holds one row per
/// user with at least one entry, sorted by net worked hours, highest first.
pub fn aggregate_month(
    room_id: Uuid,
    year: i32,
    month: u32,
    entries: &[AttendanceEntry],
    windows: &[TimeWindow],
    users: &HashMap<Uuid, User>,
    calendar: &Calendar,
) -> Vec<MonthlyWorkStatistic> {
    let by_id: HashMap<Uuid, &TimeWindow> = windows.iter().map(|w| (w.id, w)).collect();
    let mut tallies: BTreeMap<Uuid, WorkTally> = BTreeMap::new();

    for entry in entries {
        let window = entry
            .time_window_id
            .and_then(|id| by_id.get(&id).copied())
            .or_else(|| matcher::match_day(windows, entry.attendance_day, calendar));

        tallies.entry(entry.user_id).or_default().record(entry, window);
    }

    let mut statistics: Vec<MonthlyWorkStatistic> = tallies
        .into_iter()
        .map(|(user_id, tally)| {
            let user = users.get(&user_id);
            MonthlyWorkStatistic {
                user_id,
                firstname: user.map(|u| u.firstname.clone()),
                lastname: user.map(|u| u.lastname.clone()),
                room_id,
                month,
                year,
                number_of_attendances: tally.attendances,
                late_arrival_count: tally.late_arrivals,
                leave_early_count: tally.early_leaves,
                standard_work_hours_per_month: tally.standard,
                total_arrival_early_hours: tally.arrival_early,
                total_arrival_late_hours: tally.arrival_late,
                total_departure_early_hours: tally.departure_early,
                total_departure_late_hours: tally.departure_late,
                total_time_work_hours_per_month: tally.net_hours(),
            }
        })
        .collect();

    statistics.sort_by(|a, b| {
        b.total_time_work_hours_per_month
            .total_cmp(&a.total_time_work_hours_per_month)
    });
    statistics
}
