pub mod attendance;
pub mod response;
pub mod room;
pub mod statistic;
pub mod time_window;
pub mod user;
