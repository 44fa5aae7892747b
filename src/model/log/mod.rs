pub mod archive;
pub mod job;
pub mod monthly;
pub mod queue;
pub mod schedule;
pub mod severity;
pub mod system;
