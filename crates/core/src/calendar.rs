//! Calendar-day arithmetic in the service's configured timezone.
//!
//! Every "today" and "this month" question in the service is answered here so
//! that matching and aggregation agree on where a day begins.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{
    errors::{AttendanceError, AttendanceResult},
    messages,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calendar {
    tz: Tz,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Calendar {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Parses an IANA timezone name such as `Asia/Ho_Chi_Minh`.
    pub fn from_name(name: &str) -> AttendanceResult<Self> {
        let tz = name
            .parse::<Tz>()
            .map_err(|e| AttendanceError::Validation(format!("Unknown timezone {name}: {e}")))?;
        Ok(Self::new(tz))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// The local calendar day an instant falls on.
    pub fn day_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    /// The first instant of a local calendar day.
    pub fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc> {
        self.local_to_utc(day.and_time(NaiveTime::default()))
    }

    /// `[first day of month, first day of next month)` as UTC instants.
    pub fn month_bounds(&self, year: i32, month: u32) -> AttendanceResult<(DateTime<Utc>, DateTime<Utc>)> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AttendanceError::Validation(messages::INVALID_MONTH.to_string()))?;
        let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        let next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .ok_or_else(|| AttendanceError::Validation(messages::INVALID_MONTH.to_string()))?;

        Ok((self.start_of_day(first), self.start_of_day(next)))
    }

    fn local_to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        if let Some(at) = self.tz.from_local_datetime(&local).earliest() {
            return at.with_timezone(&Utc);
        }
        // Local midnight skipped by a DST jump; the day starts at the end of the gap.
        self.tz
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest()
            .map(|at| at.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&local))
    }
}
