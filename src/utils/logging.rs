use crate::model::config::Config;
use crate::model::error::system::SystemError;
use crate::model::error::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub struct Logging {
    _guard: WorkerGuard,
}

impl Logging {
    pub fn initialize(config: &Config) -> Result<Self, Error> {
        std::fs::create_dir_all(&config.log_directory)
            .map_err(|err| SystemError::logging_initialize_failed(err))?;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .map_err(|err| SystemError::logging_initialize_failed(err))?;

        let appender = tracing_appender::rolling::daily(&config.log_directory, "arkade_vault.log");
        let (file_writer, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .with(fmt::layer().with_ansi(false).with_writer(file_writer))
            .try_init()
            .map_err(|err| SystemError::logging_initialize_failed(err))?;

        log_panics::init();

        Ok(Self { _guard: guard })
    }
}
