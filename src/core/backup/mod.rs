pub mod archive_catalog;
pub mod archive_executor;
pub mod archive_writer;
pub mod backup_queue;
pub mod monthly_archiver;
pub mod retention_sweeper;
pub mod source_layout;
