use crate::core::backup::archive_catalog::ArchiveCatalog;
use crate::core::backup::backup_queue::{BackupQueue, EnqueueOutcome};
use crate::core::infrastructure::reporter::Reporter;
use crate::core::schedule::interval_scheduler::IntervalScheduler;
use crate::interface::job_list_view::JobListView;
use crate::model::backup::queue_request::{QueueRequest, Trigger};
use crate::model::config::Config;
use crate::model::error::Error;
use crate::model::job::Job;
use crate::model::log::schedule::ScheduleLog;
use crate::model::schedule::interval::Interval;
use chrono::{DateTime, Local, TimeDelta};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub checked: usize,
    pub requeued: Vec<String>,
}

/// Requeues jobs whose last archive is older than their cadence allows.
pub struct OverdueReconciler {
    catalog: Arc<ArchiveCatalog>,
    grace: TimeDelta,
    check_interval: TimeDelta,
    last_check: Option<DateTime<Local>>,
    view: Option<Arc<dyn JobListView>>,
    reporter: Reporter,
}

impl OverdueReconciler {
    pub fn new(catalog: Arc<ArchiveCatalog>, grace: TimeDelta, check_interval: TimeDelta, reporter: Reporter) -> Self {
        Self {
            catalog,
            grace,
            check_interval,
            last_check: None,
            view: None,
            reporter,
        }
    }

    pub fn from_config(catalog: Arc<ArchiveCatalog>, config: &Config, reporter: Reporter) -> Self {
        Self::new(
            catalog,
            TimeDelta::seconds(config.overdue_grace_seconds),
            TimeDelta::seconds(config.overdue_check_interval_seconds),
            reporter,
        )
    }

    pub fn attach_view(&mut self, view: Arc<dyn JobListView>) {
        self.view = Some(view);
    }

    pub fn last_check(&self) -> Option<DateTime<Local>> {
        self.last_check
    }

    /// Runs `reconcile` unless the previous check is more recent than the
    /// check interval.
    pub async fn maybe_reconcile(
        &mut self,
        jobs: &[Job],
        scheduler: &mut IntervalScheduler,
        queue: &BackupQueue,
        now: DateTime<Local>,
    ) -> Option<ReconcileReport> {
        if let Some(last_check) = self.last_check {
            if now.signed_duration_since(last_check) < self.check_interval {
                return None;
            }
        }
        Some(self.reconcile(jobs, scheduler, queue, now).await)
    }

    pub async fn reconcile(
        &mut self,
        jobs: &[Job],
        scheduler: &mut IntervalScheduler,
        queue: &BackupQueue,
        now: DateTime<Local>,
    ) -> ReconcileReport {
        self.last_check = Some(now);

        let mut report = ReconcileReport::default();
        for job in jobs {
            report.checked += 1;
            match self.reconcile_job(job, scheduler, queue, now).await {
                Ok(true) => report.requeued.push(job.name.clone()),
                Ok(false) => {}
                Err(err) => self.reporter.report(&ScheduleLog::OverdueJobFailed {
                    name: job.name.clone(),
                    reason: err.to_string(),
                }),
            }
        }

        self.reporter.report(&ScheduleLog::OverdueCheckCompleted {
            requeued: report.requeued.len(),
        });
        if !report.requeued.is_empty() {
            if let Some(view) = &self.view {
                view.refresh();
            }
        }
        report
    }

    async fn reconcile_job(
        &self,
        job: &Job,
        scheduler: &mut IntervalScheduler,
        queue: &BackupQueue,
        now: DateTime<Local>,
    ) -> Result<bool, Error> {
        let interval = Interval::new(job.interval_value, job.interval_unit)?;

        match self.catalog.latest_archive(&job.destination).await? {
            None => self.reporter.report(&ScheduleLog::OverdueNeverBackedUp {
                name: job.name.clone(),
            }),
            Some(archive) => {
                let mut due_at = archive.modified + interval.as_delta();
                if let Some(next_run_at) = scheduler.next_run_at(&job.name) {
                    due_at = due_at.max(next_run_at);
                }
                if now < due_at + self.grace {
                    return Ok(false);
                }
                self.reporter.report(&ScheduleLog::OverdueRequeued {
                    name: job.name.clone(),
                    due_at: due_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                });
            }
        }

        match queue.enqueue_at(QueueRequest::new(job, Trigger::Overdue, now), now)? {
            EnqueueOutcome::Queued => {
                scheduler.set_next_run_at(&job.name, now + interval.as_delta());
                Ok(true)
            }
            EnqueueOutcome::Skipped { .. } => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backup::backup_queue::QueueSettings;
    use crate::core::backup::backup_queue::tests::CountingExecutor;
    use crate::core::backup::retention_sweeper::tests::aged_file;
    use crate::core::infrastructure::io_manager::IOManager;
    use crate::model::job::GameType;
    use crate::model::schedule::interval::IntervalUnit;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    #[derive(Default)]
    struct CountingView {
        refreshed: AtomicUsize,
    }

    impl JobListView for CountingView {
        fn refresh(&self) {
            self.refreshed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn reconciler() -> OverdueReconciler {
        let catalog = Arc::new(ArchiveCatalog::new(Arc::new(IOManager::with_limit(4))));
        OverdueReconciler::new(catalog, TimeDelta::minutes(5), TimeDelta::minutes(5), Reporter::detached())
    }

    fn hourly(name: &str, destination: &Path) -> Job {
        Job::new(name, GameType::Ark, "/srv", destination, 1, IntervalUnit::Hours, 7)
    }

    fn queue(executor: Arc<CountingExecutor>) -> BackupQueue {
        BackupQueue::start(executor, QueueSettings::default(), Reporter::detached())
    }

    #[tokio::test]
    async fn requeues_only_significantly_overdue_jobs() {
        let stale = tempdir().unwrap();
        let fresh = tempdir().unwrap();
        let now = Local::now();
        aged_file(stale.path(), "stale_1.zip", now - TimeDelta::hours(3));
        aged_file(fresh.path(), "fresh_1.zip", now - TimeDelta::minutes(50));
        let jobs = vec![hourly("stale", stale.path()), hourly("fresh", fresh.path())];

        let executor = Arc::new(CountingExecutor::default());
        let queue = queue(executor.clone());
        let mut scheduler = IntervalScheduler::new(Reporter::detached());
        let view = Arc::new(CountingView::default());
        let mut reconciler = reconciler();
        reconciler.attach_view(view.clone());

        let report = reconciler.reconcile(&jobs, &mut scheduler, &queue, now).await;
        queue.shutdown().await;

        assert_eq!(report.checked, 2);
        assert_eq!(report.requeued, vec!["stale"]);
        assert_eq!(executor.names(), vec!["stale"]);
        assert_eq!(executor.executed.lock().unwrap()[0].1, Trigger::Overdue);
        assert_eq!(view.refreshed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn job_without_archive_runs_immediately() {
        let empty = tempdir().unwrap();
        let now = Local::now();
        let job = hourly("newcomer", empty.path());
        let executor = Arc::new(CountingExecutor::default());
        let queue = queue(executor.clone());
        let mut scheduler = IntervalScheduler::new(Reporter::detached());
        scheduler.install(&job, now).unwrap();

        let report = reconciler().reconcile(&[job], &mut scheduler, &queue, now).await;
        queue.shutdown().await;

        assert_eq!(report.requeued, vec!["newcomer"]);
        assert_eq!(scheduler.next_run_at("newcomer"), Some(now + TimeDelta::hours(1)));
    }

    #[tokio::test]
    async fn later_planned_run_postpones_requeue() {
        let dir = tempdir().unwrap();
        let now = Local::now();
        aged_file(dir.path(), "island_1.zip", now - TimeDelta::hours(3));
        let job = hourly("island", dir.path());
        let queue = queue(Arc::new(CountingExecutor::default()));
        let mut scheduler = IntervalScheduler::new(Reporter::detached());
        scheduler.install(&job, now).unwrap();

        let report = reconciler().reconcile(&[job], &mut scheduler, &queue, now).await;
        queue.shutdown().await;

        assert!(report.requeued.is_empty());
    }

    #[tokio::test]
    async fn throttles_repeated_checks() {
        let empty = tempdir().unwrap();
        let now = Local::now();
        let jobs = vec![hourly("island", empty.path())];
        let queue = queue(Arc::new(CountingExecutor::default()));
        let mut scheduler = IntervalScheduler::new(Reporter::detached());
        let mut reconciler = reconciler();

        assert!(reconciler.maybe_reconcile(&jobs, &mut scheduler, &queue, now).await.is_some());
        assert!(reconciler
            .maybe_reconcile(&jobs, &mut scheduler, &queue, now + TimeDelta::minutes(4))
            .await
            .is_none());
        assert!(reconciler
            .maybe_reconcile(&jobs, &mut scheduler, &queue, now + TimeDelta::minutes(5))
            .await
            .is_some());
        queue.shutdown().await;
    }
}
