pub mod attendance;
pub mod health;
pub mod room;
pub mod statistic;
pub mod time;
