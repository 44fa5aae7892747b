use crate::core::backup::archive_writer::ArchiveWriter;
use crate::core::backup::retention_sweeper::RetentionSweeper;
use crate::core::infrastructure::reporter::Reporter;
use crate::interface::backup_executor::BackupExecutor;
use crate::model::backup::archive::{ArchiveOutcome, SweepReport};
use crate::model::backup::queue_request::QueueRequest;
use crate::model::error::archive::ArchiveError;
use crate::model::error::system::SystemError;
use crate::model::error::Error;
use crate::model::job::Job;
use crate::model::log::archive::ArchiveLog;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::sync::Arc;

/// Builds the archive on the blocking pool, then prunes expired archives.
pub struct ArchiveBackupExecutor {
    writer: Arc<ArchiveWriter>,
    sweeper: Arc<RetentionSweeper>,
    reporter: Reporter,
}

impl ArchiveBackupExecutor {
    pub fn new(writer: Arc<ArchiveWriter>, sweeper: Arc<RetentionSweeper>, reporter: Reporter) -> Self {
        Self {
            writer,
            sweeper,
            reporter,
        }
    }

    async fn build(&self, job: Job, now: DateTime<Local>) -> Result<ArchiveOutcome, Error> {
        let writer = self.writer.clone();
        tokio::task::spawn_blocking(move || writer.build(&job, now))
            .await
            .map_err(|err| SystemError::thread_panic(err))?
    }

    async fn sweep(&self, job: &Job, now: DateTime<Local>, keep: Option<PathBuf>) -> Result<SweepReport, Error> {
        let sweeper = self.sweeper.clone();
        let directory = job.destination.clone();
        let retention_days = job.retention_days;
        tokio::task::spawn_blocking(move || sweeper.sweep(&directory, retention_days, now, keep.as_deref()))
            .await
            .map_err(|err| SystemError::thread_panic(err))?
    }

    fn report_sweep_failure(&self, job: &Job, err: Error) {
        self.reporter.report(&ArchiveLog::SweepFailed {
            path: job.destination.clone(),
            reason: err.to_string(),
        });
    }
}

#[async_trait]
impl BackupExecutor for ArchiveBackupExecutor {
    async fn execute(&self, request: QueueRequest) -> Result<ArchiveOutcome, Error> {
        let job = request.job;
        let now = Local::now();

        let outcome = match self.build(job.clone(), now).await {
            Err(Error::Archive(ArchiveError::DiskFull { .. })) => {
                self.reporter.report(&ArchiveLog::DiskFullRetry {
                    name: job.name.clone(),
                });
                if let Err(err) = self.sweep(&job, now, None).await {
                    self.report_sweep_failure(&job, err);
                }
                self.build(job.clone(), now).await?
            }
            result => result?,
        };

        if let Err(err) = self.sweep(&job, now, Some(outcome.path.clone())).await {
            self.report_sweep_failure(&job, err);
        }

        Ok(outcome)
    }
}
