use crate::core::backup::archive_catalog::ArchiveCatalog;
use crate::core::infrastructure::io_manager::IOManager;
use crate::core::infrastructure::reporter::Reporter;
use crate::interface::file_system::FileSystemTrait;
use crate::model::backup::archive::ArchiveEntry;
use crate::model::backup::monthly::{CopyState, MonthlyCopy, MonthlyReport, MonthlySelection, MonthlyStatus};
use crate::model::error::Error;
use crate::model::job::Job;
use crate::model::log::monthly::MonthlyLog;
use chrono::{DateTime, Datelike, Local};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Copies the oldest archives of the current month into a dated rollup tree.
pub struct MonthlyArchiver {
    catalog: Arc<ArchiveCatalog>,
    io_manager: Arc<IOManager>,
    files_per_job: usize,
    reporter: Reporter,
}

impl MonthlyArchiver {
    pub fn new(
        catalog: Arc<ArchiveCatalog>,
        io_manager: Arc<IOManager>,
        files_per_job: usize,
        reporter: Reporter,
    ) -> Self {
        Self {
            catalog,
            io_manager,
            files_per_job,
            reporter,
        }
    }

    /// `2026-03-March`
    pub fn month_folder(now: DateTime<Local>) -> String {
        now.format("%Y-%m-%B").to_string()
    }

    pub fn job_folder(root: &Path, job: &Job, now: DateTime<Local>) -> PathBuf {
        root.join(Self::month_folder(now))
            .join(job.game_type.archive_folder())
    }

    pub async fn select(&self, job: &Job, now: DateTime<Local>) -> Result<Vec<ArchiveEntry>, Error> {
        let archives = self.catalog.list_archives(&job.destination).await?;
        Ok(archives
            .into_iter()
            .filter(|entry| entry.modified.year() == now.year() && entry.modified.month() == now.month())
            .take(self.files_per_job)
            .collect())
    }

    pub async fn preview(&self, jobs: &[Job], now: DateTime<Local>) -> Vec<MonthlySelection> {
        let mut selections = Vec::with_capacity(jobs.len());
        for job in jobs {
            match self.select(job, now).await {
                Ok(archives) => selections.push(MonthlySelection {
                    name: job.name.clone(),
                    game_type: job.game_type,
                    archives,
                }),
                Err(err) => self.report_failure(job, &err),
            }
        }
        selections
    }

    pub async fn archive_all(&self, jobs: &[Job], root: &Path, now: DateTime<Local>) -> MonthlyReport {
        self.reporter.report(&MonthlyLog::Started);

        let mut report = MonthlyReport {
            destination: root.to_path_buf(),
            ..MonthlyReport::default()
        };
        let mut archived_jobs = 0;
        for job in jobs {
            match self.archive_job(job, root, now).await {
                Ok(copies) if copies.is_empty() => {
                    self.reporter.report(&MonthlyLog::NoBackups {
                        name: job.name.clone(),
                    });
                    report.without_backups.push(job.name.clone());
                }
                Ok(copies) => {
                    archived_jobs += 1;
                    report.copies.extend(copies);
                }
                Err(err) => {
                    self.report_failure(job, &err);
                    report.failed.push(job.name.clone());
                }
            }
        }

        self.reporter.report(&MonthlyLog::Completed {
            jobs: archived_jobs,
            destination: root.to_path_buf(),
        });
        report
    }

    async fn archive_job(&self, job: &Job, root: &Path, now: DateTime<Local>) -> Result<Vec<MonthlyCopy>, Error> {
        let selection = self.select(job, now).await?;
        if selection.is_empty() {
            return Ok(Vec::new());
        }

        let target_dir = Self::job_folder(root, job, now);
        self.io_manager.create_directory(target_dir.clone()).await?;
        let folder = format!("{}/{}", Self::month_folder(now), job.game_type.archive_folder());

        let mut copies = Vec::with_capacity(selection.len());
        for archive in selection {
            let target = target_dir.join(&archive.file_name);
            let present =
                target.is_file() && self.io_manager.metadata(target.clone()).await?.len() == archive.size;

            let state = if present {
                self.reporter.report(&MonthlyLog::AlreadyArchived {
                    file: archive.file_name.clone(),
                    folder: folder.clone(),
                });
                CopyState::AlreadyArchived
            } else {
                self.io_manager
                    .copy_file(archive.path.clone(), target.clone())
                    .await?;
                self.reporter.report(&MonthlyLog::Copied {
                    file: archive.file_name.clone(),
                    folder: folder.clone(),
                });
                CopyState::Copied
            };

            copies.push(MonthlyCopy {
                source: archive.path,
                target,
                state,
            });
        }
        Ok(copies)
    }

    /// Rollup files of each job already present for the current month.
    pub async fn status(&self, jobs: &[Job], root: &Path, now: DateTime<Local>) -> Vec<MonthlyStatus> {
        let mut statuses = Vec::with_capacity(jobs.len());
        for job in jobs {
            let folder = Self::job_folder(root, job, now);
            let prefix = format!("{}_", job.name);
            let mut archived = Vec::new();
            if folder.is_dir() {
                match self.io_manager.list_directory(folder.clone()).await {
                    Ok(paths) => {
                        archived = paths
                            .iter()
                            .filter_map(|path| path.file_name())
                            .map(|name| name.to_string_lossy().into_owned())
                            .filter(|name| name.starts_with(&prefix) && name.ends_with(".zip"))
                            .collect();
                        archived.sort();
                    }
                    Err(err) => self.report_failure(job, &Error::from(err)),
                }
            }
            statuses.push(MonthlyStatus {
                name: job.name.clone(),
                folder,
                archived,
            });
        }
        statuses
    }

    fn report_failure(&self, job: &Job, err: &Error) {
        self.reporter.report(&MonthlyLog::JobFailed {
            name: job.name.clone(),
            reason: err.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backup::retention_sweeper::tests::aged_file;
    use crate::model::job::GameType;
    use crate::model::schedule::interval::IntervalUnit;
    use chrono::{TimeDelta, TimeZone};
    use tempfile::tempdir;

    fn archiver() -> MonthlyArchiver {
        let io_manager = Arc::new(IOManager::with_limit(4));
        MonthlyArchiver::new(
            Arc::new(ArchiveCatalog::new(io_manager.clone())),
            io_manager,
            2,
            Reporter::detached(),
        )
    }

    fn mid_month() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap()
    }

    fn seeded_job(destination: &Path, now: DateTime<Local>) -> Job {
        aged_file(destination, "ragnarok_a.zip", now - TimeDelta::days(15));
        aged_file(destination, "ragnarok_b.zip", now - TimeDelta::days(10));
        aged_file(destination, "ragnarok_c.zip", now - TimeDelta::days(2));
        aged_file(destination, "ragnarok_last_month.zip", now - TimeDelta::days(25));
        Job::new("ragnarok", GameType::Ark, "/srv/ark", destination, 30, IntervalUnit::Minutes, 40)
    }

    #[test]
    fn month_folder_uses_full_month_name() {
        assert_eq!(MonthlyArchiver::month_folder(mid_month()), "2026-03-March");
    }

    #[tokio::test]
    async fn copies_two_oldest_of_the_month() {
        let backups = tempdir().unwrap();
        let root = tempdir().unwrap();
        let now = mid_month();
        let job = seeded_job(backups.path(), now);

        let report = archiver().archive_all(&[job.clone()], root.path(), now).await;

        let folder = root.path().join("2026-03-March/ASA");
        assert_eq!(report.copied(), 2);
        assert!(folder.join("ragnarok_a.zip").is_file());
        assert!(folder.join("ragnarok_b.zip").is_file());
        assert!(!folder.join("ragnarok_c.zip").exists());
        assert!(!folder.join("ragnarok_last_month.zip").exists());
        assert!(backups.path().join("ragnarok_a.zip").is_file());

        let status = archiver().status(&[job], root.path(), now).await;
        assert_eq!(status[0].archived, vec!["ragnarok_a.zip", "ragnarok_b.zip"]);
    }

    #[tokio::test]
    async fn rerun_in_same_month_copies_nothing() {
        let backups = tempdir().unwrap();
        let root = tempdir().unwrap();
        let now = mid_month();
        let job = seeded_job(backups.path(), now);
        let archiver = archiver();

        archiver.archive_all(&[job.clone()], root.path(), now).await;
        let second = archiver.archive_all(&[job], root.path(), now).await;

        assert_eq!(second.copied(), 0);
        assert!(second
            .copies
            .iter()
            .all(|copy| copy.state == CopyState::AlreadyArchived));
    }

    #[tokio::test]
    async fn job_without_backups_is_reported() {
        let backups = tempdir().unwrap();
        let root = tempdir().unwrap();
        let job = Job::new("pal", GameType::Palworld, "/srv/pal", backups.path(), 1, IntervalUnit::Hours, 3);

        let report = archiver().archive_all(&[job], root.path(), mid_month()).await;
        assert_eq!(report.without_backups, vec!["pal"]);
        assert!(report.copies.is_empty());
    }

    #[tokio::test]
    async fn preview_does_not_copy() {
        let backups = tempdir().unwrap();
        let now = mid_month();
        let job = seeded_job(backups.path(), now);

        let preview = archiver().preview(&[job], now).await;
        let names: Vec<_> = preview[0]
            .archives
            .iter()
            .map(|entry| entry.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["ragnarok_a.zip", "ragnarok_b.zip"]);
    }
}
