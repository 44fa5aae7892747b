use crate::model::log::severity::Severity;
use macros::loggable;
use std::path::PathBuf;

loggable! {
    ArchiveLog {
        #[error("Creating {game} backup from {} to {}", .source_root.display(), .destination.display())]
        BuildStarted { game: String, source_root: PathBuf, destination: PathBuf } => Severity::Info,

        #[error("Skipping {} (may be locked by the server): {reason}", .path.display())]
        FileSkipped { path: PathBuf, reason: String } => Severity::Warning,

        #[error("Published {} with {entries} verified entries", .path.display())]
        Published { path: PathBuf, entries: usize } => Severity::Info,

        #[error("Removed old backup: {}", .path.display())]
        OldBackupRemoved { path: PathBuf } => Severity::Info,

        #[error("Failed to remove old backup {}: {reason}", .path.display())]
        OldBackupRemoveFailed { path: PathBuf, reason: String } => Severity::Warning,

        #[error("Backup of {name} ran out of disk space, cleaning up old backups and retrying")]
        DiskFullRetry { name: String } => Severity::Warning,

        #[error("Error cleaning old backups in {}: {reason}", .path.display())]
        SweepFailed { path: PathBuf, reason: String } => Severity::Warning,
    }
}
