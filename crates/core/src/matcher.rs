//! Matching check events to the scheduled window of their day.
//!
//! A window belongs to the calendar day its `start_time` falls on in the
//! service timezone. Once the window is chosen, punctuality is judged on full
//! timestamps, never on time-of-day alone.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{calendar::Calendar, models::time_window::TimeWindow};

/// How an actual check event relates to a scheduled boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuality {
    Early(Duration),
    OnTime,
    Late(Duration),
}

impl Punctuality {
    pub fn between(actual: DateTime<Utc>, scheduled: DateTime<Utc>) -> Self {
        if actual < scheduled {
            Punctuality::Early(scheduled - actual)
        } else if actual > scheduled {
            Punctuality::Late(actual - scheduled)
        } else {
            Punctuality::OnTime
        }
    }
}

/// The first window, in stored order, scheduled on the same day as `at`.
pub fn match_window<'a>(
    windows: &'a [TimeWindow],
    at: DateTime<Utc>,
    calendar: &Calendar,
) -> Option<&'a TimeWindow> {
    match_day(windows, calendar.day_of(at), calendar)
}

pub fn match_day<'a>(
    windows: &'a [TimeWindow],
    day: NaiveDate,
    calendar: &Calendar,
) -> Option<&'a TimeWindow> {
    windows
        .iter()
        .find(|window| calendar.day_of(window.start_time) == day)
}

pub fn is_late_arrival(check_in: DateTime<Utc>, window: &TimeWindow) -> bool {
    check_in > window.start_time
}

pub fn is_leave_early(check_out: DateTime<Utc>, window: &TimeWindow) -> bool {
    check_out < window.end_time
}

pub fn arrival(check_in: DateTime<Utc>, window: &TimeWindow) -> Punctuality {
    Punctuality::between(check_in, window.start_time)
}

pub fn departure(check_out: DateTime<Utc>, window: &TimeWindow) -> Punctuality {
    Punctuality::between(check_out, window.end_time)
}
