use crate::model::error::io::IOError;
use crate::model::error::system::SystemError;
use crate::model::error::Error;
use fs4::fs_std::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

enum LockState {
    Acquired,
    Held,
}

impl From<bool> for LockState {
    fn from(acquired: bool) -> Self {
        if acquired { LockState::Acquired } else { LockState::Held }
    }
}

impl From<()> for LockState {
    fn from(_: ()) -> Self {
        LockState::Acquired
    }
}

/// Exclusive advisory lock held for the lifetime of the process.
#[derive(Debug)]
pub struct InstanceLock {
    file: File,
    path: PathBuf,
}

impl InstanceLock {
    pub fn acquire(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| IOError::create_directory_failed(parent, err))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|err| IOError::lock_file_failed(&path, err))?;

        match FileExt::try_lock_exclusive(&file) {
            Ok(state) => match LockState::from(state) {
                LockState::Acquired => Ok(Self { file, path }),
                LockState::Held => Err(SystemError::instance_locked(path))?,
            },
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                Err(SystemError::instance_locked(path))?
            }
            Err(err) => Err(IOError::lock_file_failed(path, err))?,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        if FileExt::unlock(&self.file).is_err() {
            tracing::warn!("Failed to release {}", self.path.display());
        }
    }
}
