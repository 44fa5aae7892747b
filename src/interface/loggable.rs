use crate::model::log::severity::Severity;
use std::fmt::Display;

/// A log event or error that knows its own severity.
pub trait Loggable: Display {
    fn severity(&self) -> Severity;

    fn level(&self) -> tracing::Level {
        self.severity().level()
    }

    fn log(&self) {
        let message = self.to_string();
        match self.level() {
            tracing::Level::ERROR => tracing::error!("{}", message),
            tracing::Level::WARN => tracing::warn!("{}", message),
            tracing::Level::INFO => tracing::info!("{}", message),
            tracing::Level::DEBUG => tracing::debug!("{}", message),
            tracing::Level::TRACE => tracing::trace!("{}", message),
        }
    }
}
