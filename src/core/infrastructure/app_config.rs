use crate::model::config::{Config, ConfigTable};
use crate::model::error::system::SystemError;
use crate::model::error::Error;
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

pub struct AppConfig {
    config: Config,
    path: PathBuf,
}

impl AppConfig {
    pub fn new() -> Result<Self, Error> {
        Self::load("./config.toml")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let config = Self::load_config_file(&path)?;
        Self::validate(&config)?;
        Ok(Self { config, path })
    }

    pub fn from_config(config: Config) -> Result<Self, Error> {
        Self::validate(&config)?;
        Ok(Self {
            config,
            path: PathBuf::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn jobs_file(&self) -> PathBuf {
        self.data_directory.join("backup_jobs.json")
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.data_directory.join("preferences.json")
    }

    pub fn lock_file(&self) -> PathBuf {
        self.data_directory.join("instance.lock")
    }

    fn load_config_file(path: &Path) -> Result<Config, Error> {
        let toml_string =
            fs::read_to_string(path).map_err(|err| SystemError::config_not_found(path, err))?;
        let config = toml::from_str::<ConfigTable>(&toml_string)
            .map_err(|err| SystemError::invalid_config(err))?
            .config;
        Ok(config)
    }

    fn validate(config: &Config) -> Result<(), Error> {
        let checks = [
            (config.tick_interval_ms == 0, "tick_interval_ms must be positive"),
            (
                config.overdue_check_interval_seconds < 0,
                "overdue_check_interval_seconds cannot be negative",
            ),
            (config.overdue_grace_seconds < 0, "overdue_grace_seconds cannot be negative"),
            (config.dedup_window_seconds < 0, "dedup_window_seconds cannot be negative"),
            (
                config.dedup_retention_seconds < config.dedup_window_seconds,
                "dedup_retention_seconds must cover dedup_window_seconds",
            ),
            (config.monthly_files_per_job == 0, "monthly_files_per_job must be positive"),
            (
                !(0..=9).contains(&config.compression_level),
                "compression_level must be between 0 and 9",
            ),
            (config.max_file_operations == 0, "max_file_operations must be positive"),
        ];
        match checks.iter().find(|(failed, _)| *failed) {
            Some((_, reason)) => Err(SystemError::invalid_config(reason))?,
            None => Ok(()),
        }
    }
}

impl Deref for AppConfig {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}
