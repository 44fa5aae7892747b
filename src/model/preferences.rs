use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    #[serde(default)]
    pub monthly_backup_destination: Option<PathBuf>,
}
