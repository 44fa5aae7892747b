use crate::model::log::severity::Severity;
use macros::loggable;
use std::path::PathBuf;

loggable! {
    SystemLog {
        #[error("Initializing")]
        Initializing => Severity::Info,

        #[error("Initialization completed")]
        InitializeComplete => Severity::Info,

        #[error("Configuration loaded from {}", .path.display())]
        ConfigLoaded { path: PathBuf } => Severity::Info,

        #[error("Instance lock acquired: {}", .path.display())]
        InstanceLockAcquired { path: PathBuf } => Severity::Info,

        #[error("Online now, ticking every {interval_ms} ms")]
        Online { interval_ms: u64 } => Severity::Info,

        #[error("Termination in process")]
        Terminating => Severity::Info,

        #[error("Termination completed")]
        TerminateComplete => Severity::Info,
    }
}
