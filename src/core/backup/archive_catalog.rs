use crate::core::backup::archive_writer::ARCHIVE_EXTENSION;
use crate::core::infrastructure::io_manager::IOManager;
use crate::interface::file_system::FileSystemTrait;
use crate::model::backup::archive::ArchiveEntry;
use crate::model::error::io::IOError;
use crate::model::error::Error;
use chrono::{DateTime, Local};
use std::path::Path;
use std::sync::Arc;

/// Read-only view of the archives in a destination directory.
pub struct ArchiveCatalog {
    io_manager: Arc<IOManager>,
}

impl ArchiveCatalog {
    pub fn new(io_manager: Arc<IOManager>) -> Self {
        Self { io_manager }
    }

    /// Archives sorted oldest first. A missing directory has no archives.
    pub async fn list_archives(&self, directory: &Path) -> Result<Vec<ArchiveEntry>, Error> {
        if !directory.is_dir() {
            return Ok(Vec::new());
        }

        let mut archives = Vec::new();
        for path in self.io_manager.list_directory(directory.to_path_buf()).await? {
            let is_archive = path
                .extension()
                .is_some_and(|extension| extension.eq_ignore_ascii_case(ARCHIVE_EXTENSION));
            if !is_archive {
                continue;
            }
            let metadata = self.io_manager.metadata(path.clone()).await?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata
                .modified()
                .map_err(|err| IOError::get_metadata_failed(&path, err))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            archives.push(ArchiveEntry {
                path,
                file_name,
                modified: DateTime::<Local>::from(modified),
                size: metadata.len(),
            });
        }

        archives.sort_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });
        Ok(archives)
    }

    pub async fn latest_archive(&self, directory: &Path) -> Result<Option<ArchiveEntry>, Error> {
        Ok(self.list_archives(directory).await?.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backup::retention_sweeper::tests::aged_file;
    use chrono::TimeDelta;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn lists_archives_oldest_first() {
        let dir = tempdir().unwrap();
        let now = Local::now();
        aged_file(dir.path(), "b.zip", now - TimeDelta::hours(1));
        aged_file(dir.path(), "a.zip", now - TimeDelta::hours(5));
        aged_file(dir.path(), "c.zip.tmp", now);
        fs::create_dir(dir.path().join("folder.zip")).unwrap();

        let catalog = ArchiveCatalog::new(Arc::new(IOManager::with_limit(4)));
        let archives = catalog.list_archives(dir.path()).await.unwrap();
        let names: Vec<_> = archives.iter().map(|entry| entry.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.zip", "b.zip"]);

        let latest = catalog.latest_archive(dir.path()).await.unwrap().unwrap();
        assert_eq!(latest.file_name, "b.zip");
    }

    #[tokio::test]
    async fn missing_directory_has_no_latest() {
        let dir = tempdir().unwrap();
        let catalog = ArchiveCatalog::new(Arc::new(IOManager::with_limit(4)));
        assert!(
            catalog
                .latest_archive(&dir.path().join("absent"))
                .await
                .unwrap()
                .is_none()
        );
    }
}
