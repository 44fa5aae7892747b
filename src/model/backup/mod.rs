pub mod archive;
pub mod backup_record;
pub mod monthly;
pub mod queue_request;
