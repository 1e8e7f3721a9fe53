mod attendance_test;
mod middleware_test;
mod room_test;
mod statistic_test;
mod time_test;
