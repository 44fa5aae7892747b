pub mod interval;
pub mod schedule_entry;
