use crate::core::infrastructure::reporter::Reporter;
use crate::model::error::io::IOError;
use crate::model::error::system::SystemError;
use crate::model::error::Error;
use crate::model::preferences::Preferences;
use crate::utils::atomic_file::write_atomic;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct PreferenceStore {
    path: PathBuf,
    preferences: Preferences,
}

impl PreferenceStore {
    pub fn load(path: impl AsRef<Path>, reporter: &Reporter) -> Self {
        let path = path.as_ref().to_path_buf();
        let preferences = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => Preferences::default(),
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                reporter.report(&IOError::read_file_failed(&path, err));
                Preferences::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Preferences::default(),
            Err(err) => {
                reporter.report(&IOError::read_file_failed(&path, err));
                Preferences::default()
            }
        };
        Self { path, preferences }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn monthly_destination(&self) -> Option<&Path> {
        self.preferences.monthly_backup_destination.as_deref()
    }

    pub fn set_monthly_destination(&mut self, destination: PathBuf) -> Result<(), Error> {
        let mut preferences = self.preferences.clone();
        preferences.monthly_backup_destination = Some(destination);
        let json = serde_json::to_string_pretty(&preferences)
            .map_err(|err| SystemError::serialize_failed("preferences", err))?;
        write_atomic(&self.path, json.as_bytes())?;
        self.preferences = preferences;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn remembers_monthly_destination() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let mut store = PreferenceStore::load(&path, &Reporter::detached());
        assert_eq!(store.monthly_destination(), None);

        store
            .set_monthly_destination(PathBuf::from("/mnt/rollups"))
            .unwrap();

        let reloaded = PreferenceStore::load(&path, &Reporter::detached());
        assert_eq!(reloaded.monthly_destination(), Some(Path::new("/mnt/rollups")));
        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["monthly_backup_destination"], "/mnt/rollups");
    }
}
