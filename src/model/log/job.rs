use crate::model::log::severity::Severity;
use macros::loggable;
use std::path::PathBuf;

loggable! {
    JobLog {
        #[error("Loaded {count} job(s) from {}", .path.display())]
        Loaded { path: PathBuf, count: usize } => Severity::Info,

        #[error("No jobs file found at {}. Starting fresh", .path.display())]
        JobsFileMissing { path: PathBuf } => Severity::Info,

        #[error("Jobs file is empty: {}", .path.display())]
        JobsFileEmpty { path: PathBuf } => Severity::Warning,

        #[error("Job list reset to empty after a load failure")]
        JobsReset => Severity::Warning,

        #[error("Added new job: {name}")]
        Added { name: String } => Severity::Success,

        #[error("Updated job: {name}")]
        Updated { name: String } => Severity::Info,

        #[error("Successfully deleted job: {name}")]
        Deleted { name: String } => Severity::Success,

        #[error("Monthly backup destination set to {}", .path.display())]
        MonthlyDestinationChanged { path: PathBuf } => Severity::Info,
    }
}
