use std::collections::{HashMap, HashSet};

use tracing::debug;
use uuid::Uuid;

use crate::{
    errors::{AttendanceError, AttendanceResult},
    messages,
    models::statistic::MonthlyWorkStatistic,
    statistics,
};

use super::ServiceContext;

#[derive(Clone)]
pub struct StatisticService {
    ctx: ServiceContext,
}

impl StatisticService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Ranked work-time statistics of every user who attended the room in the
    /// given month.
    pub async fn statistics_for_month(
        &self,
        room_id: Uuid,
        month: u32,
        year: i32,
    ) -> AttendanceResult<Vec<MonthlyWorkStatistic>> {
        if !(1..=12).contains(&month) {
            return Err(AttendanceError::Validation(messages::INVALID_MONTH.to_string()));
        }
        self.ctx.room(room_id).await?;

        let (from, to) = self.ctx.calendar.month_bounds(year, month)?;
        let entries = self
            .ctx
            .io(
                "find_attendance_between",
                self.ctx.stores.attendance.find_by_room_between(room_id, from, to),
            )
            .await?;
        let windows = self
            .ctx
            .io("find_windows_by_room", self.ctx.stores.windows.find_by_room(room_id))
            .await?;

        let user_ids: Vec<Uuid> = entries
            .iter()
            .map(|e| e.user_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let users: HashMap<_, _> = self
            .ctx
            .io("find_users", self.ctx.stores.users.find_many(user_ids))
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let ranked = statistics::aggregate_month(
            room_id,
            year,
            month,
            &entries,
            &windows,
            &users,
            &self.ctx.calendar,
        );

        debug!(%room_id, month, year, users = ranked.len(), "monthly statistics computed");
        Ok(ranked)
    }
}
