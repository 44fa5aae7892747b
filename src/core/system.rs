use crate::core::backup_manager::BackupManager;
use crate::core::infrastructure::app_config::AppConfig;
use crate::core::infrastructure::reporter::Reporter;
use crate::model::error::Error;
use crate::model::log::system::SystemLog;
use crate::utils::instance_lock::InstanceLock;
use crate::utils::logging::Logging;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::time::MissedTickBehavior;

pub struct System {
    config: Arc<AppConfig>,
    manager: BackupManager,
    reporter: Reporter,
    _instance_lock: InstanceLock,
    _logging: Logging,
}

impl System {
    pub async fn new() -> Result<Self, Error> {
        let config = Arc::new(AppConfig::new()?);
        let logging = Logging::initialize(&config)?;
        let reporter = Reporter::detached();
        reporter.report(&SystemLog::Initializing);
        reporter.report(&SystemLog::ConfigLoaded {
            path: config.path().to_path_buf(),
        });

        let instance_lock = InstanceLock::acquire(config.lock_file())?;
        reporter.report(&SystemLog::InstanceLockAcquired {
            path: instance_lock.path().to_path_buf(),
        });

        let mut manager = BackupManager::new(config.clone(), reporter.clone());
        manager.start(Local::now()).await;
        reporter.report(&SystemLog::InitializeComplete);

        Ok(Self {
            config,
            manager,
            reporter,
            _instance_lock: instance_lock,
            _logging: logging,
        })
    }

    /// Ticks the manager until Ctrl-C.
    pub async fn run(&mut self) {
        let interval_ms = self.config.tick_interval_ms;
        self.reporter.report(&SystemLog::Online { interval_ms });

        let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            select! {
                result = &mut shutdown => {
                    if let Err(err) = result {
                        tracing::error!("Failed to listen for shutdown signal: {}", err);
                    }
                    break;
                }
                _ = ticker.tick() => {
                    self.manager.tick(Local::now()).await;
                }
            }
        }
    }

    pub async fn terminate(self) {
        self.reporter.report(&SystemLog::Terminating);
        self.manager.shutdown().await;
        self.reporter.report(&SystemLog::TerminateComplete);
    }
}
