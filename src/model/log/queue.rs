use crate::model::log::severity::Severity;
use macros::loggable;
use std::path::PathBuf;

loggable! {
    QueueLog {
        #[error("Backup queue processor started")]
        WorkerStarted => Severity::Info,

        #[error("Backup queue processor stopped")]
        WorkerStopped => Severity::Info,

        #[error("Queued backup job: {name} (starting immediately)")]
        QueuedImmediately { name: String } => Severity::Info,

        #[error("Queued backup job: {name} (waiting for current backup to complete)")]
        QueuedBehind { name: String } => Severity::Info,

        #[error("Skipping duplicate backup request for {name} (queued {seconds} seconds ago)")]
        DuplicateSkipped { name: String, seconds: i64 } => Severity::Info,

        #[error("=== Starting Scheduled Backup for {name} ===")]
        ScheduledBackupStarted { name: String } => Severity::Info,

        #[error("=== Starting Manual Backup for {name} ===")]
        ManualBackupStarted { name: String } => Severity::Info,

        #[error("=== Backup Completed Successfully for {name} ({size} bytes, {}) ===", .path.display())]
        BackupCompleted { name: String, path: PathBuf, size: u64 } => Severity::Success,

        #[error("Backup failed for {name}: {reason}")]
        BackupFailed { name: String, reason: String } => Severity::Error,

        #[error("Shutting down backup queue with {pending} request(s) pending")]
        Draining { pending: usize } => Severity::Info,

        #[error("Backup queue did not drain in time, discarding {pending} request(s)")]
        Aborted { pending: usize } => Severity::Warning,
    }
}
