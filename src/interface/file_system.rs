use crate::model::error::io::IOError;
use async_trait::async_trait;
use std::fs::Metadata;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Semaphore;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReadDirStream;

#[async_trait]
pub trait FileSystemTrait {
    fn new(semaphore: Arc<Semaphore>) -> Self;

    fn semaphore(&self) -> Arc<Semaphore>;

    async fn list_directory(&self, path: PathBuf) -> Result<Vec<PathBuf>, IOError> {
        let semaphore = self.semaphore();
        let _permit = semaphore
            .acquire_owned()
            .await
            .map_err(|_| IOError::SemaphoreClosed)?;
        let mut result = Vec::new();
        let reader = fs::read_dir(&path)
            .await
            .map_err(|err| IOError::read_directory_failed(&path, err))?;
        let mut entries = ReadDirStream::new(reader);
        while let Some(entry) = entries.next().await {
            let entry = entry.map_err(|err| IOError::read_directory_failed(&path, err))?;
            result.push(entry.path());
        }
        Ok(result)
    }

    async fn metadata(&self, path: PathBuf) -> Result<Metadata, IOError> {
        let semaphore = self.semaphore();
        let _permit = semaphore
            .acquire_owned()
            .await
            .map_err(|_| IOError::SemaphoreClosed)?;
        fs::metadata(&path)
            .await
            .map_err(|err| IOError::get_metadata_failed(&path, err))
    }

    async fn create_directory(&self, path: PathBuf) -> Result<(), IOError> {
        let semaphore = self.semaphore();
        let _permit = semaphore
            .acquire_owned()
            .await
            .map_err(|_| IOError::SemaphoreClosed)?;
        fs::create_dir_all(&path)
            .await
            .map_err(|err| IOError::create_directory_failed(&path, err))?;
        Ok(())
    }

    async fn copy_file(&self, source: PathBuf, destination: PathBuf) -> Result<u64, IOError> {
        let semaphore = self.semaphore();
        let _permit = semaphore
            .acquire_owned()
            .await
            .map_err(|_| IOError::SemaphoreClosed)?;
        fs::copy(&source, &destination)
            .await
            .map_err(|err| IOError::copy_file_failed(&source, &destination, err))
    }
}
