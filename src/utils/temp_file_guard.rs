use std::fs;
use std::path::{Path, PathBuf};

/// Removes the file on drop unless it has been disarmed.
pub struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if self.armed && self.path.exists() && fs::remove_file(&self.path).is_err() {
            tracing::warn!("Failed to remove temporary file {}", self.path.display());
        }
    }
}
