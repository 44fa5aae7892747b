use crate::model::backup::archive::ArchiveEntry;
use crate::model::job::GameType;
use std::path::PathBuf;

/// Archives chosen for this month's rollup of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySelection {
    pub name: String,
    pub game_type: GameType,
    pub archives: Vec<ArchiveEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyState {
    Copied,
    AlreadyArchived,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCopy {
    pub source: PathBuf,
    pub target: PathBuf,
    pub state: CopyState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyReport {
    pub destination: PathBuf,
    pub copies: Vec<MonthlyCopy>,
    pub without_backups: Vec<String>,
    pub failed: Vec<String>,
}

impl MonthlyReport {
    pub fn copied(&self) -> usize {
        self.copies
            .iter()
            .filter(|copy| copy.state == CopyState::Copied)
            .count()
    }
}

/// Rollup files already present for a job this month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyStatus {
    pub name: String,
    pub folder: PathBuf,
    pub archived: Vec<String>,
}
