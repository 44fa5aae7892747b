use crate::core::infrastructure::reporter::Reporter;
use crate::interface::backup_executor::BackupExecutor;
use crate::model::backup::backup_record::{BackupRecord, BackupResult};
use crate::model::backup::queue_request::{QueueMessage, QueueRequest, Trigger};
use crate::model::config::Config;
use crate::model::error::system::SystemError;
use crate::model::error::Error;
use crate::model::log::queue::QueueLog;
use chrono::{DateTime, Local, TimeDelta};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy)]
pub struct QueueSettings {
    pub dedup_window: TimeDelta,
    pub dedup_retention: TimeDelta,
    pub shutdown_timeout: Duration,
}

impl QueueSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            dedup_window: TimeDelta::seconds(config.dedup_window_seconds),
            dedup_retention: TimeDelta::seconds(config.dedup_retention_seconds),
            shutdown_timeout: Duration::from_secs(config.shutdown_timeout_seconds),
        }
    }
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Queued,
    Skipped { since: DateTime<Local> },
}

struct WorkerState {
    pending: AtomicUsize,
    running: AtomicBool,
    records: DashMap<String, BackupRecord>,
}

/// Serializes backups through a single worker task.
pub struct BackupQueue {
    sender: UnboundedSender<QueueMessage>,
    state: Arc<WorkerState>,
    worker: Mutex<Option<JoinHandle<()>>>,
    recent: DashMap<String, DateTime<Local>>,
    closed: AtomicBool,
    settings: QueueSettings,
    reporter: Reporter,
}

impl BackupQueue {
    /// Spawns the worker. Must be called inside a tokio runtime.
    pub fn start(executor: Arc<dyn BackupExecutor>, settings: QueueSettings, reporter: Reporter) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let state = Arc::new(WorkerState {
            pending: AtomicUsize::new(0),
            running: AtomicBool::new(false),
            records: DashMap::new(),
        });
        let handle = tokio::spawn(Self::drain(receiver, executor, state.clone(), reporter.clone()));
        Self {
            sender,
            state,
            worker: Mutex::new(Some(handle)),
            recent: DashMap::new(),
            closed: AtomicBool::new(false),
            settings,
            reporter,
        }
    }

    pub fn enqueue(&self, request: QueueRequest) -> Result<EnqueueOutcome, Error> {
        self.enqueue_at(request, Local::now())
    }

    /// Drops the request when the same job was enqueued within the dedup window.
    pub fn enqueue_at(&self, request: QueueRequest, now: DateTime<Local>) -> Result<EnqueueOutcome, Error> {
        if self.closed.load(Ordering::Acquire) {
            Err(SystemError::QueueClosed)?
        }

        let retention = self.settings.dedup_retention;
        self.recent
            .retain(|_, enqueued_at| now.signed_duration_since(*enqueued_at) < retention);

        let name = request.name().to_string();
        match self.recent.entry(name.clone()) {
            Entry::Occupied(mut entry) => {
                let since = *entry.get();
                if now.signed_duration_since(since) < self.settings.dedup_window {
                    drop(entry);
                    self.reporter.report(&QueueLog::DuplicateSkipped {
                        name,
                        seconds: now.signed_duration_since(since).num_seconds(),
                    });
                    return Ok(EnqueueOutcome::Skipped { since });
                }
                entry.insert(now);
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
            }
        }

        let busy = self.is_running() || self.queue_size() > 0;
        self.state.pending.fetch_add(1, Ordering::AcqRel);
        if self.sender.send(QueueMessage::Request(request)).is_err() {
            self.state.pending.fetch_sub(1, Ordering::AcqRel);
            self.recent.remove(&name);
            Err(SystemError::QueueClosed)?
        }

        if busy {
            self.reporter.report(&QueueLog::QueuedBehind { name });
        } else {
            self.reporter.report(&QueueLog::QueuedImmediately { name });
        }
        Ok(EnqueueOutcome::Queued)
    }

    /// Requests waiting for the worker, excluding the one in progress.
    pub fn queue_size(&self) -> usize {
        self.state.pending.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::Acquire)
    }

    pub fn last_record(&self, name: &str) -> Option<BackupRecord> {
        self.state.records.get(name).map(|record| record.value().clone())
    }

    /// Lets the worker finish what is queued, bounded by the shutdown timeout.
    pub async fn shutdown(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        self.reporter.report(&QueueLog::Draining {
            pending: self.queue_size(),
        });
        let _ = self.sender.send(QueueMessage::Poison);

        let mut worker = self.worker.lock().await;
        if let Some(mut handle) = worker.take() {
            match tokio::time::timeout(self.settings.shutdown_timeout, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => self.reporter.report(&SystemError::thread_panic(err)),
                Err(_) => {
                    handle.abort();
                    self.reporter.report(&QueueLog::Aborted {
                        pending: self.queue_size(),
                    });
                }
            }
        }
    }

    async fn drain(
        mut receiver: UnboundedReceiver<QueueMessage>,
        executor: Arc<dyn BackupExecutor>,
        state: Arc<WorkerState>,
        reporter: Reporter,
    ) {
        reporter.report(&QueueLog::WorkerStarted);
        while let Some(message) = receiver.recv().await {
            let request = match message {
                QueueMessage::Request(request) => request,
                QueueMessage::Poison => break,
            };
            state.running.store(true, Ordering::Release);
            state.pending.fetch_sub(1, Ordering::AcqRel);
            Self::process(request, executor.as_ref(), &state, &reporter).await;
            state.running.store(false, Ordering::Release);
        }
        reporter.report(&QueueLog::WorkerStopped);
    }

    async fn process(request: QueueRequest, executor: &dyn BackupExecutor, state: &WorkerState, reporter: &Reporter) {
        let name = request.name().to_string();
        let trigger = request.trigger;
        match trigger {
            Trigger::Manual => reporter.report(&QueueLog::ManualBackupStarted { name: name.clone() }),
            Trigger::Scheduled | Trigger::Overdue => {
                reporter.report(&QueueLog::ScheduledBackupStarted { name: name.clone() })
            }
        }

        let result = match executor.execute(request).await {
            Ok(outcome) => {
                reporter.report(&QueueLog::BackupCompleted {
                    name: name.clone(),
                    path: outcome.path.clone(),
                    size: outcome.size,
                });
                BackupResult::Completed(outcome)
            }
            Err(err) => {
                reporter.report(&QueueLog::BackupFailed {
                    name: name.clone(),
                    reason: err.to_string(),
                });
                BackupResult::Failed(err.to_string())
            }
        };

        state.records.insert(
            name.clone(),
            BackupRecord {
                name,
                trigger,
                finished_at: Local::now(),
                result,
            },
        );
    }
}
