use crate::model::log::severity::Severity;
use macros::traceable;
use std::path::PathBuf;

traceable! {
    ArchiveError {
        #[no_source]
        #[error("Source path not found: {}", .path.display())]
        SourceNotFound { path: PathBuf } => Severity::Error,

        #[no_source]
        #[error("Nothing matched the inclusion settings of job {job}")]
        NoContent { job: String } => Severity::Error,

        #[error("Archive {} failed verification: {err}", .path.display())]
        IntegrityCheckFailed { path: PathBuf } => Severity::Error,

        #[error("Not enough disk space to write {}: {err}", .path.display())]
        DiskFull { path: PathBuf } => Severity::Error,

        #[error("Failed to write archive {}: {err}", .path.display())]
        WriteArchiveFailed { path: PathBuf } => Severity::Error,
    }
}
