use crate::model::schedule::interval::IntervalUnit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    #[serde(rename = "ARK")]
    Ark,
    #[serde(rename = "Palworld")]
    Palworld,
}

impl GameType {
    /// Folder name used under a monthly rollup.
    pub fn archive_folder(&self) -> &'static str {
        match self {
            GameType::Ark => "ASA",
            GameType::Palworld => "PAL",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameType::Ark => f.write_str("ARK"),
            GameType::Palworld => f.write_str("Palworld"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Job {
    #[serde(alias = "zip_name")]
    pub name: String,
    pub game_type: GameType,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub interval_value: i64,
    pub interval_unit: IntervalUnit,
    #[serde(alias = "keep_days")]
    pub retention_days: u32,
    #[serde(default)]
    pub include_save: bool,
    #[serde(default)]
    pub include_server_config: bool,
    #[serde(default, alias = "include_config")]
    pub include_plugin_config: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_map: Option<String>,
}

impl Job {
    pub fn new(
        name: impl Into<String>,
        game_type: GameType,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        interval_value: i64,
        interval_unit: IntervalUnit,
        retention_days: u32,
    ) -> Self {
        Self {
            name: name.into(),
            game_type,
            source: source.into(),
            destination: destination.into(),
            interval_value,
            interval_unit,
            retention_days,
            include_save: false,
            include_server_config: false,
            include_plugin_config: false,
            selected_map: None,
        }
    }

    /// Map id filter for ARK saves. An empty value matches every map.
    pub fn map_filter(&self) -> &str {
        self.selected_map.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_field_names() {
        let json = r#"{
            "zip_name": "island",
            "game_type": "ARK",
            "source": "/srv/ark",
            "destination": "/backups/ark",
            "interval_value": 30,
            "interval_unit": "minutes",
            "keep_days": 7,
            "include_save": true,
            "include_config": true
        }"#;

        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.name, "island");
        assert_eq!(job.game_type, GameType::Ark);
        assert_eq!(job.retention_days, 7);
        assert!(job.include_save);
        assert!(job.include_plugin_config);
        assert!(!job.include_server_config);
        assert_eq!(job.selected_map, None);
    }

    #[test]
    fn writes_canonical_field_names() {
        let job = Job::new(
            "palserver",
            GameType::Palworld,
            "/srv/pal",
            "/backups/pal",
            2,
            IntervalUnit::Hours,
            14,
        );

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["name"], "palserver");
        assert_eq!(value["game_type"], "Palworld");
        assert_eq!(value["interval_unit"], "hours");
        assert_eq!(value["retention_days"], 14);
        assert!(value.get("selected_map").is_none());
    }
}
