use crate::model::error::io::IOError;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Writes `contents` beside `path` and renames it into place.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), IOError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| IOError::create_directory_failed(parent, err))?;
    }

    let temp = temp_path(path);
    let result = File::create(&temp)
        .and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        })
        .map_err(|err| IOError::write_file_failed(&temp, err))
        .and_then(|_| {
            fs::rename(&temp, path).map_err(|err| IOError::rename_file_failed(&temp, path, err))
        });

    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn replaces_existing_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        write_atomic(&path, b"[1]").unwrap();
        write_atomic(&path, b"[1,2]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[1,2]");
        assert!(!temp_path(&path).exists());
    }
}
