use crate::model::log::severity::Severity;
use macros::traceable;
use std::path::PathBuf;

traceable! {
    IOError {
        #[no_source]
        #[error("Semaphore has been closed")]
        SemaphoreClosed => Severity::Error,

        #[error("Failed to create directory {}: {err}", .path.display())]
        CreateDirectoryFailed { path: PathBuf } => Severity::Error,

        #[error("Failed to read directory {}: {err}", .path.display())]
        ReadDirectoryFailed { path: PathBuf } => Severity::Error,

        #[error("Failed to read file {}: {err}", .path.display())]
        ReadFileFailed { path: PathBuf } => Severity::Error,

        #[error("Failed to write file {}: {err}", .path.display())]
        WriteFileFailed { path: PathBuf } => Severity::Error,

        #[error("Failed to copy file from {} to {}: {err}", .src.display(), .dst.display())]
        CopyFileFailed { src: PathBuf, dst: PathBuf } => Severity::Error,

        #[error("Failed to rename file from {} to {}: {err}", .src.display(), .dst.display())]
        RenameFileFailed { src: PathBuf, dst: PathBuf } => Severity::Error,

        #[error("Failed to delete file {}: {err}", .path.display())]
        DeleteFileFailed { path: PathBuf } => Severity::Error,

        #[error("Failed to get file metadata {}: {err}", .path.display())]
        GetMetadataFailed { path: PathBuf } => Severity::Error,

        #[error("Failed to lock file {}: {err}", .path.display())]
        LockFileFailed { path: PathBuf } => Severity::Error,
    }
}
