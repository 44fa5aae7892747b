use crate::model::log::severity::Severity;
use macros::traceable;
use std::path::PathBuf;

traceable! {
    JobError {
        #[no_source]
        #[error("A job with name '{name}' already exists")]
        DuplicateName { name: String } => Severity::Warning,

        #[no_source]
        #[error("Invalid job index: {index}")]
        NotFound { index: usize } => Severity::Warning,

        #[no_source]
        #[error("Job name cannot be empty")]
        EmptyName => Severity::Warning,

        #[error("Error parsing jobs file {}: {err}", .path.display())]
        ParseFailed { path: PathBuf } => Severity::Error,

        #[error("Error saving jobs to {}: {err}", .path.display())]
        SaveFailed { path: PathBuf } => Severity::Error,
    }
}
