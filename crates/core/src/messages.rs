//! User-facing messages shared by the services and the store backends.

pub const START_BEFORE_END: &str = "The start time must be less than the end time";
pub const OVERLAPPING_TIME: &str = "The time period you specified overlaps with an existing time period. Please enter a different time period.";

pub const ROOM_NOT_FOUND: &str = "Room not found";
pub const TIME_NOT_FOUND: &str = "Time is not found";
pub const NOT_TIME_OWNER: &str = "You are not authorized to change the time";
pub const NOT_ROOM_OWNER: &str = "You are not authorized to manage this room";

pub const INVALID_EMAIL: &str = "Invalid email";
pub const ALREADY_MEMBER: &str = "This member has already joined the room before";

pub const IP_NOT_ALLOWED: &str = "Your network is not allowed to check in to this room";
pub const NOT_A_MEMBER: &str = "You are not a member of this room";
pub const ALREADY_CHECKED_IN: &str = "You have already checked in earlier";
pub const ALREADY_CHECKED_OUT: &str = "You have already checked out";
pub const NOT_CHECKED_IN: &str = "You haven't checked in yet";
pub const NO_SCHEDULE_TODAY: &str = "There is no schedule for this room today";

pub const INVALID_MONTH: &str = "Month must be between 1 and 12";
