use crate::core::backup::archive_catalog::ArchiveCatalog;
use crate::core::backup::archive_executor::ArchiveBackupExecutor;
use crate::core::backup::archive_writer::ArchiveWriter;
use crate::core::backup::backup_queue::{BackupQueue, EnqueueOutcome, QueueSettings};
use crate::core::backup::monthly_archiver::MonthlyArchiver;
use crate::core::backup::retention_sweeper::RetentionSweeper;
use crate::core::infrastructure::app_config::AppConfig;
use crate::core::infrastructure::io_manager::IOManager;
use crate::core::infrastructure::reporter::Reporter;
use crate::core::job::job_store::JobStore;
use crate::core::job::preference_store::PreferenceStore;
use crate::core::schedule::interval_scheduler::IntervalScheduler;
use crate::core::schedule::monthly_trigger::MonthlyTrigger;
use crate::core::schedule::overdue_reconciler::{OverdueReconciler, ReconcileReport};
use crate::interface::backup_executor::BackupExecutor;
use crate::interface::job_list_view::JobListView;
use crate::model::backup::archive::ArchiveEntry;
use crate::model::backup::backup_record::BackupRecord;
use crate::model::backup::monthly::{MonthlyReport, MonthlySelection, MonthlyStatus};
use crate::model::backup::queue_request::{QueueRequest, Trigger};
use crate::model::error::job::JobError;
use crate::model::error::Error;
use crate::model::job::Job;
use crate::model::log::job::JobLog;
use crate::model::log::schedule::ScheduleLog;
use crate::model::schedule::interval::Interval;
use crate::model::schedule::schedule_entry::ScheduleEntry;
use chrono::{DateTime, Local, TimeDelta};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SCHEDULER_HEARTBEAT_SECONDS: i64 = 60;

#[derive(Debug, Default)]
pub struct TickReport {
    pub fired: usize,
    pub reconcile: Option<ReconcileReport>,
    pub monthly: Option<MonthlyReport>,
}

/// Entry point for the control task. Owns every component and keeps the
/// job list and the installed triggers in step.
pub struct BackupManager {
    config: Arc<AppConfig>,
    store: JobStore,
    preferences: PreferenceStore,
    scheduler: IntervalScheduler,
    queue: BackupQueue,
    reconciler: OverdueReconciler,
    monthly_trigger: MonthlyTrigger,
    monthly_archiver: MonthlyArchiver,
    catalog: Arc<ArchiveCatalog>,
    io_manager: Arc<IOManager>,
    view: Option<Arc<dyn JobListView>>,
    last_tick: Option<DateTime<Local>>,
    reporter: Reporter,
}

impl BackupManager {
    /// Must be called inside a tokio runtime; the backup worker is spawned here.
    pub fn new(config: Arc<AppConfig>, reporter: Reporter) -> Self {
        let writer = Arc::new(ArchiveWriter::new(config.compression_level, reporter.clone()));
        let sweeper = Arc::new(RetentionSweeper::new(reporter.clone()));
        let executor = Arc::new(ArchiveBackupExecutor::new(writer, sweeper, reporter.clone()));
        Self::with_executor(config, executor, reporter)
    }

    pub fn with_executor(config: Arc<AppConfig>, executor: Arc<dyn BackupExecutor>, reporter: Reporter) -> Self {
        let io_manager = Arc::new(IOManager::new(&config));
        let catalog = Arc::new(ArchiveCatalog::new(io_manager.clone()));
        let store = JobStore::load(config.jobs_file(), reporter.clone());
        let preferences = PreferenceStore::load(config.preferences_file(), &reporter);
        let queue = BackupQueue::start(executor, QueueSettings::from_config(&config), reporter.clone());
        let reconciler = OverdueReconciler::from_config(catalog.clone(), &config, reporter.clone());
        let monthly_archiver = MonthlyArchiver::new(
            catalog.clone(),
            io_manager.clone(),
            config.monthly_files_per_job,
            reporter.clone(),
        );

        Self {
            store,
            preferences,
            scheduler: IntervalScheduler::new(reporter.clone()),
            queue,
            reconciler,
            monthly_trigger: MonthlyTrigger::new(config.monthly_check_time),
            monthly_archiver,
            catalog,
            io_manager,
            view: None,
            last_tick: None,
            reporter,
            config,
        }
    }

    pub fn attach_view(&mut self, view: Arc<dyn JobListView>) {
        self.reconciler.attach_view(view.clone());
        self.view = Some(view);
    }

    /// Installs every persisted job, anchored at its last archive, then runs
    /// the overdue check once.
    pub async fn start(&mut self, now: DateTime<Local>) -> ReconcileReport {
        let jobs = self.store.jobs().to_vec();
        for job in &jobs {
            let anchor = match self.catalog.latest_archive(&job.destination).await {
                Ok(latest) => latest.map_or(now, |archive| archive.modified),
                Err(err) => {
                    self.reporter.report(&err);
                    now
                }
            };
            // install reports its own failures
            let _ = self.scheduler.install(job, anchor);
        }
        self.reporter.report(&ScheduleLog::MonthlyCheckScheduled {
            time: self.monthly_trigger.check_time().format("%H:%M").to_string(),
        });

        self.reconciler
            .reconcile(self.store.jobs(), &mut self.scheduler, &self.queue, now)
            .await
    }

    pub fn jobs(&self) -> &[Job] {
        self.store.jobs()
    }

    pub fn add_job(&mut self, job: Job) -> Result<(), Error> {
        Interval::new(job.interval_value, job.interval_unit)?;
        self.store.add(job.clone())?;
        self.scheduler.install(&job, Local::now())?;
        self.refresh_view();
        Ok(())
    }

    pub fn update_job(&mut self, index: usize, job: Job) -> Result<(), Error> {
        Interval::new(job.interval_value, job.interval_unit)?;
        let previous = self.store.update(index, job.clone())?;
        self.scheduler.cancel(&previous.name);
        self.scheduler.install(&job, Local::now())?;
        self.refresh_view();
        Ok(())
    }

    pub fn delete_job(&mut self, index: usize) -> Result<Job, Error> {
        let removed = self.store.delete(index)?;
        self.scheduler.cancel(&removed.name);
        self.refresh_view();
        Ok(removed)
    }

    pub fn run_now(&self, index: usize) -> Result<EnqueueOutcome, Error> {
        let job = self.store.get(index).ok_or(JobError::not_found(index))?;
        self.queue
            .enqueue(QueueRequest::new(job, Trigger::Manual, Local::now()))
    }

    /// One pass of the control loop: due triggers, the throttled overdue
    /// check, then the daily monthly check.
    pub async fn tick(&mut self, now: DateTime<Local>) -> TickReport {
        self.last_tick = Some(now);
        let mut report = TickReport::default();

        for request in self.scheduler.tick(now) {
            report.fired += 1;
            if let Err(err) = self.queue.enqueue_at(request, now) {
                self.reporter.report(&err);
            }
        }

        report.reconcile = self
            .reconciler
            .maybe_reconcile(self.store.jobs(), &mut self.scheduler, &self.queue, now)
            .await;

        if self.monthly_trigger.poll(now) {
            report.monthly = Some(self.archive_monthly(None, now).await);
        }
        report
    }

    pub async fn archive_monthly(&self, destination: Option<&Path>, now: DateTime<Local>) -> MonthlyReport {
        let root = self.monthly_root(destination);
        self.monthly_archiver
            .archive_all(self.store.jobs(), &root, now)
            .await
    }

    pub async fn monthly_preview(&self, now: DateTime<Local>) -> Vec<MonthlySelection> {
        self.monthly_archiver.preview(self.store.jobs(), now).await
    }

    pub async fn monthly_status(&self, now: DateTime<Local>) -> Vec<MonthlyStatus> {
        let root = self.monthly_root(None);
        self.monthly_archiver
            .status(self.store.jobs(), &root, now)
            .await
    }

    /// Explicit argument, then the stored preference, then the configured default.
    pub fn monthly_root(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .or_else(|| self.preferences.monthly_destination())
            .unwrap_or(self.config.default_monthly_destination.as_path())
            .to_path_buf()
    }

    pub fn set_monthly_destination(&mut self, destination: PathBuf) -> Result<(), Error> {
        self.preferences
            .set_monthly_destination(destination.clone())?;
        self.reporter
            .report(&JobLog::MonthlyDestinationChanged { path: destination });
        Ok(())
    }

    pub fn queue_size(&self) -> usize {
        self.queue.queue_size()
    }

    pub fn is_backup_running(&self) -> bool {
        self.queue.is_running()
    }

    /// True while the control loop has ticked within the last minute.
    pub fn is_scheduler_running(&self) -> bool {
        self.last_tick.is_some_and(|last_tick| {
            Local::now().signed_duration_since(last_tick) < TimeDelta::seconds(SCHEDULER_HEARTBEAT_SECONDS)
        })
    }

    pub fn last_record(&self, name: &str) -> Option<BackupRecord> {
        self.queue.last_record(name)
    }

    pub async fn latest_archive(&self, index: usize) -> Result<Option<ArchiveEntry>, Error> {
        let job = self.store.get(index).ok_or(JobError::not_found(index))?;
        self.catalog.latest_archive(&job.destination).await
    }

    pub fn schedule_status(&self) -> Vec<ScheduleEntry> {
        self.scheduler.status()
    }

    pub async fn shutdown(&self) {
        self.queue.shutdown().await;
        self.io_manager.terminate();
    }

    fn refresh_view(&self) {
        if let Some(view) = &self.view {
            view.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backup::backup_queue::tests::CountingExecutor;
    use crate::core::backup::retention_sweeper::tests::aged_file;
    use crate::model::config::Config;
    use crate::model::error::schedule::ScheduleError;
    use crate::model::job::GameType;
    use crate::model::schedule::interval::IntervalUnit;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::{tempdir, TempDir};

    #[derive(Default)]
    struct CountingView {
        refreshed: AtomicUsize,
    }

    impl JobListView for CountingView {
        fn refresh(&self) {
            self.refreshed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn config(dir: &TempDir) -> Arc<AppConfig> {
        let config = Config {
            data_directory: dir.path().join("data"),
            log_directory: dir.path().join("logs"),
            default_monthly_destination: dir.path().join("monthly"),
            ..Config::default()
        };
        Arc::new(AppConfig::from_config(config).unwrap())
    }

    fn manager(dir: &TempDir, executor: Arc<CountingExecutor>) -> BackupManager {
        BackupManager::with_executor(config(dir), executor, Reporter::detached())
    }

    fn job(name: &str, destination: &Path) -> Job {
        Job::new(name, GameType::Ark, "/srv/ark", destination, 30, IntervalUnit::Minutes, 7)
    }

    #[tokio::test]
    async fn add_update_delete_keep_triggers_in_step() {
        let dir = tempdir().unwrap();
        let mut manager = manager(&dir, Arc::new(CountingExecutor::default()));
        let view = Arc::new(CountingView::default());
        manager.attach_view(view.clone());

        manager.add_job(job("island", dir.path())).unwrap();
        manager.add_job(job("scorched", dir.path())).unwrap();
        assert_eq!(manager.schedule_status().len(), 2);

        let mut renamed = job("center", dir.path());
        renamed.interval_unit = IntervalUnit::Hours;
        manager.update_job(0, renamed).unwrap();
        let names: Vec<_> = manager.schedule_status().into_iter().map(|entry| entry.name).collect();
        assert!(names.contains(&String::from("center")));
        assert!(!names.contains(&String::from("island")));

        manager.delete_job(1).unwrap();
        let status = manager.schedule_status();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].interval_seconds(), 30 * 3600);
        assert_eq!(view.refreshed.load(Ordering::SeqCst), 4);
        manager.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_interval_is_rejected_before_saving() {
        let dir = tempdir().unwrap();
        let mut manager = manager(&dir, Arc::new(CountingExecutor::default()));
        let mut broken = job("island", dir.path());
        broken.interval_value = 0;

        assert!(matches!(
            manager.add_job(broken),
            Err(Error::Schedule(ScheduleError::InvalidInterval { .. }))
        ));
        assert!(manager.jobs().is_empty());
        manager.shutdown().await;
    }

    #[tokio::test]
    async fn start_requeues_overdue_and_tick_fires_due_triggers() {
        let dir = tempdir().unwrap();
        let backups = dir.path().join("backups");
        std::fs::create_dir_all(&backups).unwrap();
        let now = Local::now();
        aged_file(&backups, "island_old.zip", now - TimeDelta::hours(2));

        {
            let mut seed = manager(&dir, Arc::new(CountingExecutor::default()));
            seed.add_job(job("island", &backups)).unwrap();
            seed.shutdown().await;
        }

        let executor = Arc::new(CountingExecutor::default());
        let mut manager = manager(&dir, executor.clone());
        let report = manager.start(now).await;
        assert_eq!(report.requeued, vec!["island"]);
        assert_eq!(manager.schedule_status()[0].next_run_at, now + TimeDelta::minutes(30));

        let later = now + TimeDelta::minutes(31);
        let tick = manager.tick(later).await;
        assert_eq!(tick.fired, 1);
        assert!(tick.reconcile.is_some());
        assert!(manager.is_scheduler_running());

        manager.shutdown().await;
        let executed = executor.executed.lock().unwrap().clone();
        assert_eq!(
            executed,
            vec![
                (String::from("island"), Trigger::Overdue),
                (String::from("island"), Trigger::Scheduled),
            ]
        );
    }

    #[tokio::test]
    async fn run_now_rejects_unknown_index() {
        let dir = tempdir().unwrap();
        let manager = manager(&dir, Arc::new(CountingExecutor::default()));
        assert!(matches!(
            manager.run_now(3),
            Err(Error::Job(JobError::NotFound { index: 3 }))
        ));
        manager.shutdown().await;
    }

    #[tokio::test]
    async fn monthly_root_prefers_explicit_then_preference() {
        let dir = tempdir().unwrap();
        let mut manager = manager(&dir, Arc::new(CountingExecutor::default()));
        assert_eq!(manager.monthly_root(None), dir.path().join("monthly"));

        manager
            .set_monthly_destination(dir.path().join("preferred"))
            .unwrap();
        assert_eq!(manager.monthly_root(None), dir.path().join("preferred"));
        assert_eq!(
            manager.monthly_root(Some(Path::new("/explicit"))),
            PathBuf::from("/explicit")
        );
        manager.shutdown().await;
    }

    #[tokio::test]
    async fn first_of_month_tick_runs_monthly_archive() {
        let dir = tempdir().unwrap();
        let backups = dir.path().join("backups");
        std::fs::create_dir_all(&backups).unwrap();
        let first = Local.with_ymd_and_hms(2026, 5, 1, 23, 15, 0).unwrap();
        aged_file(&backups, "island_a.zip", first - TimeDelta::hours(20));

        let mut manager = manager(&dir, Arc::new(CountingExecutor::default()));
        manager.add_job(job("island", &backups)).unwrap();

        let tick = manager.tick(first).await;
        let monthly = tick.monthly.unwrap();
        assert_eq!(monthly.copied(), 1);
        assert!(dir.path().join("monthly/2026-05-May/ASA/island_a.zip").is_file());
        assert!(manager.tick(first + TimeDelta::minutes(5)).await.monthly.is_none());
        manager.shutdown().await;
    }
}
