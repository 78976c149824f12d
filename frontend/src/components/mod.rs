pub mod availability_calendar;

pub use availability_calendar::AvailabilityCalendar;
