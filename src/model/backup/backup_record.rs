use crate::model::backup::archive::ArchiveOutcome;
use crate::model::backup::queue_request::Trigger;
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum BackupResult {
    Completed(ArchiveOutcome),
    Failed(String),
}

/// Last outcome of a job, kept for display.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    pub name: String,
    pub trigger: Trigger,
    pub finished_at: DateTime<Local>,
    pub result: BackupResult,
}

impl BackupRecord {
    pub fn succeeded(&self) -> bool {
        matches!(self.result, BackupResult::Completed(_))
    }
}
