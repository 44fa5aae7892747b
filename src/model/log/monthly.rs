use crate::model::log::severity::Severity;
use macros::loggable;
use std::path::PathBuf;

loggable! {
    MonthlyLog {
        #[error("=== Starting Monthly Archive Process ===")]
        Started => Severity::Info,

        #[error("Copied {file} to monthly archive/{folder}")]
        Copied { file: String, folder: String } => Severity::Info,

        #[error("{file} is already in monthly archive/{folder}")]
        AlreadyArchived { file: String, folder: String } => Severity::Info,

        #[error("No backup files found for {name} in current month")]
        NoBackups { name: String } => Severity::Warning,

        #[error("Error creating monthly backup for {name}: {reason}")]
        JobFailed { name: String, reason: String } => Severity::Error,

        #[error("=== Monthly Archive Complete: {jobs} job(s) archived into {} ===", .destination.display())]
        Completed { jobs: usize, destination: PathBuf } => Severity::Success,
    }
}
