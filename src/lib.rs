pub mod core;
pub mod interface;
pub mod model;
pub mod utils;

pub use crate::core::backup_manager::BackupManager;
pub use crate::core::infrastructure::app_config::AppConfig;
pub use crate::core::infrastructure::reporter::Reporter;
pub use crate::model::error::Error;
