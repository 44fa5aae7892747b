use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct ConfigTable {
    #[serde(rename = "Config")]
    pub config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub data_directory: PathBuf,
    pub log_directory: PathBuf,
    pub log_level: String,
    pub tick_interval_ms: u64,                // milli second
    pub overdue_check_interval_seconds: i64,  // second
    pub overdue_grace_seconds: i64,           // second
    pub dedup_window_seconds: i64,            // second
    pub dedup_retention_seconds: i64,         // second
    pub shutdown_timeout_seconds: u64,        // second
    pub monthly_check_time: NaiveTime,
    pub monthly_files_per_job: usize,         // number
    pub default_monthly_destination: PathBuf,
    pub compression_level: i64,
    pub max_file_operations: usize,           // number
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("./data"),
            log_directory: PathBuf::from("./logs"),
            log_level: String::from("info"),
            tick_interval_ms: 1000,
            overdue_check_interval_seconds: 300,
            overdue_grace_seconds: 300,
            dedup_window_seconds: 120,
            dedup_retention_seconds: 300,
            shutdown_timeout_seconds: 5,
            monthly_check_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or(NaiveTime::MIN),
            monthly_files_per_job: 2,
            default_monthly_destination: PathBuf::from("./monthly"),
            compression_level: 5,
            max_file_operations: 16,
        }
    }
}
