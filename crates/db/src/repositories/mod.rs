pub mod attendance;
pub mod room;
pub mod time_window;
pub mod user;
