use crate::core::backup::archive_writer::ARCHIVE_EXTENSION;
use crate::core::infrastructure::reporter::Reporter;
use crate::model::backup::archive::SweepReport;
use crate::model::error::io::IOError;
use crate::model::error::Error;
use crate::model::log::archive::ArchiveLog;
use chrono::{DateTime, Local, TimeDelta};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

pub struct RetentionSweeper {
    reporter: Reporter,
}

impl RetentionSweeper {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }

    /// Deletes archives in `directory` last modified before `now - retention_days`.
    /// `keep` is never deleted. A file that cannot be removed is reported and skipped.
    pub fn sweep(
        &self,
        directory: &Path,
        retention_days: u32,
        now: DateTime<Local>,
        keep: Option<&Path>,
    ) -> Result<SweepReport, Error> {
        let mut report = SweepReport::default();
        if !directory.is_dir() {
            return Ok(report);
        }

        let cutoff: SystemTime = (now - TimeDelta::days(i64::from(retention_days))).into();
        let reader = fs::read_dir(directory)
            .map_err(|err| IOError::read_directory_failed(directory, err))?;

        for entry in reader {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    self.reporter.report(&ArchiveLog::SweepFailed {
                        path: directory.to_path_buf(),
                        reason: err.to_string(),
                    });
                    report.failed += 1;
                    continue;
                }
            };
            let path = entry.path();
            if !is_archive(&path) || keep.is_some_and(|keep| keep == path.as_path()) {
                continue;
            }

            let modified = match entry.metadata().and_then(|metadata| metadata.modified()) {
                Ok(modified) => modified,
                Err(err) => {
                    self.reporter.report(&ArchiveLog::OldBackupRemoveFailed {
                        path,
                        reason: err.to_string(),
                    });
                    report.failed += 1;
                    continue;
                }
            };
            if modified >= cutoff {
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => {
                    self.reporter
                        .report(&ArchiveLog::OldBackupRemoved { path: path.clone() });
                    report.removed.push(path);
                }
                Err(err) => {
                    self.reporter.report(&ArchiveLog::OldBackupRemoveFailed {
                        path,
                        reason: err.to_string(),
                    });
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

fn is_archive(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
}
