pub mod backup;
pub mod config;
pub mod error;
pub mod job;
pub mod log;
pub mod preferences;
pub mod schedule;
