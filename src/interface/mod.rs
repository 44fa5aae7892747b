pub mod backup_executor;
pub mod event_sink;
pub mod file_system;
pub mod job_list_view;
pub mod loggable;
