use crate::model::backup::archive::ArchiveOutcome;
use crate::model::backup::queue_request::QueueRequest;
use crate::model::error::Error;
use async_trait::async_trait;

#[async_trait]
pub trait BackupExecutor: Send + Sync {
    async fn execute(&self, request: QueueRequest) -> Result<ArchiveOutcome, Error>;
}
