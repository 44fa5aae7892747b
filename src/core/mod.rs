pub mod backup;
pub mod backup_manager;
pub mod infrastructure;
pub mod job;
pub mod schedule;
pub mod system;
