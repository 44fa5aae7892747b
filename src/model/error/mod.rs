pub mod archive;
pub mod io;
pub mod job;
pub mod schedule;
pub mod system;

use crate::interface::loggable::Loggable;
use crate::model::error::archive::ArchiveError;
use crate::model::error::io::IOError;
use crate::model::error::job::JobError;
use crate::model::error::schedule::ScheduleError;
use crate::model::error::system::SystemError;
use crate::model::log::severity::Severity;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Archive(ArchiveError),
    #[error(transparent)]
    IO(IOError),
    #[error(transparent)]
    Job(JobError),
    #[error(transparent)]
    Schedule(ScheduleError),
    #[error(transparent)]
    System(SystemError),
}

impl Loggable for Error {
    fn severity(&self) -> Severity {
        match self {
            Error::Archive(err) => err.severity(),
            Error::IO(err) => err.severity(),
            Error::Job(err) => err.severity(),
            Error::Schedule(err) => err.severity(),
            Error::System(err) => err.severity(),
        }
    }
}

impl From<ArchiveError> for Error {
    fn from(error: ArchiveError) -> Self {
        Self::Archive(error)
    }
}

impl From<IOError> for Error {
    fn from(error: IOError) -> Self {
        Self::IO(error)
    }
}

impl From<JobError> for Error {
    fn from(error: JobError) -> Self {
        Self::Job(error)
    }
}

impl From<ScheduleError> for Error {
    fn from(error: ScheduleError) -> Self {
        Self::Schedule(error)
    }
}

impl From<SystemError> for Error {
    fn from(error: SystemError) -> Self {
        Self::System(error)
    }
}
