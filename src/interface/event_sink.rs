use crate::model::log::severity::Severity;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub severity: Severity,
    pub message: String,
    pub at: DateTime<Local>,
}

/// Receives every event the engine reports, typically a UI log panel.
pub trait EventSink: Send + Sync {
    fn emit(&self, record: EventRecord);
}
