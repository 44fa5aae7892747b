use crate::model::log::severity::Severity;
use macros::traceable;
use std::path::PathBuf;

traceable! {
    SystemError {
        #[error("Configuration not found at {}: {err}", .path.display())]
        ConfigNotFound { path: PathBuf } => Severity::Error,

        #[error("Invalid configuration: {err}")]
        InvalidConfig => Severity::Error,

        #[no_source]
        #[error("Another instance already holds {}", .path.display())]
        InstanceLocked { path: PathBuf } => Severity::Error,

        #[error("Failed to initialize logging: {err}")]
        LoggingInitializeFailed => Severity::Error,

        #[error("Failed to serialize {what}: {err}")]
        SerializeFailed { what: String } => Severity::Error,

        #[no_source]
        #[error("Backup queue has been shut down")]
        QueueClosed => Severity::Error,

        #[error("Worker task panicked: {err}")]
        ThreadPanic => Severity::Error,
    }
}
