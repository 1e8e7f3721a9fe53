//! # Services
//!
//! Orchestration of the scheduling engine over the store traits. Each service
//! owns a clone of the shared [`ServiceContext`]; authorization, validation and
//! ordering of store calls live here, never in the backends.

pub mod attendance;
pub mod room;
pub mod schedule;
pub mod statistic;

use std::{future::Future, time::Duration};

use tracing::warn;
use uuid::Uuid;

use crate::{
    calendar::Calendar,
    errors::{AttendanceError, AttendanceResult},
    messages,
    models::room::Room,
    store::Stores,
};

pub use attendance::AttendanceLedger;
pub use room::RoomService;
pub use schedule::ScheduleService;
pub use statistic::StatisticService;

/// Default upper bound on a single store call.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Dependencies shared by every service.
#[derive(Clone)]
pub struct ServiceContext {
    pub stores: Stores,
    pub calendar: Calendar,
    pub io_timeout: Duration,
}

impl ServiceContext {
    pub fn new(stores: Stores, calendar: Calendar, io_timeout: Duration) -> Self {
        Self {
            stores,
            calendar,
            io_timeout,
        }
    }

    /// Runs a store call under the uniform I/O timeout.
    pub(crate) async fn io<T, F>(&self, operation: &'static str, call: F) -> AttendanceResult<T>
    where
        F: Future<Output = AttendanceResult<T>>,
    {
        match tokio::time::timeout(self.io_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, timeout = ?self.io_timeout, "store call timed out");
                Err(AttendanceError::Timeout(format!(
                    "{operation} did not complete within {:?}, please retry",
                    self.io_timeout
                )))
            }
        }
    }

    pub(crate) async fn room(&self, room_id: Uuid) -> AttendanceResult<Room> {
        self.io("find_room", self.stores.rooms.find_room(room_id))
            .await?
            .ok_or_else(|| AttendanceError::NotFound(messages::ROOM_NOT_FOUND.to_string()))
    }
}

/// A full set of services over one context.
#[derive(Clone)]
pub struct Services {
    pub rooms: RoomService,
    pub schedule: ScheduleService,
    pub attendance: AttendanceLedger,
    pub statistics: StatisticService,
}

impl Services {
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            rooms: RoomService::new(ctx.clone()),
            schedule: ScheduleService::new(ctx.clone()),
            attendance: AttendanceLedger::new(ctx.clone()),
            statistics: StatisticService::new(ctx),
        }
    }
}
