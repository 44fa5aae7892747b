use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

/// An archive file found in a destination directory.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: PathBuf,
    pub file_name: String,
    pub modified: DateTime<Local>,
    pub size: u64,
}

/// Result of a successful build.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    pub path: PathBuf,
    pub size: u64,
    pub entries: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub removed: Vec<PathBuf>,
    pub failed: usize,
}
