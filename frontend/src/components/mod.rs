pub mod weekly_schedule;

pub use weekly_schedule::{WeeklySchedule, WeeklyScheduleProps};
