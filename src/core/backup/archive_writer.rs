use crate::core::backup::source_layout::{self, SourceEntry};
use crate::core::infrastructure::reporter::Reporter;
use crate::model::backup::archive::ArchiveOutcome;
use crate::model::error::archive::ArchiveError;
use crate::model::error::io::IOError;
use crate::model::error::Error;
use crate::model::job::Job;
use crate::model::log::archive::ArchiveLog;
use crate::utils::atomic_file::temp_path;
use crate::utils::temp_file_guard::TempFileGuard;
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const ARCHIVE_EXTENSION: &str = "zip";

pub struct ArchiveWriter {
    compression_level: i64,
    reporter: Reporter,
}

impl ArchiveWriter {
    pub fn new(compression_level: i64, reporter: Reporter) -> Self {
        Self {
            compression_level,
            reporter,
        }
    }

    pub fn archive_name(name: &str, now: DateTime<Local>) -> String {
        format!("{}_{}.{}", name, now.format("%Y%m%d_%H%M%S"), ARCHIVE_EXTENSION)
    }

    /// Builds the archive for `job` and publishes it under its final name.
    /// Nothing is left under the final name unless verification passed.
    pub fn build(&self, job: &Job, now: DateTime<Local>) -> Result<ArchiveOutcome, Error> {
        let entries = source_layout::collect(job)?;

        self.reporter.report(&ArchiveLog::BuildStarted {
            game: job.game_type.to_string(),
            source_root: job.source.clone(),
            destination: job.destination.clone(),
        });

        fs::create_dir_all(&job.destination)
            .map_err(|err| IOError::create_directory_failed(&job.destination, err))?;

        let final_path = job.destination.join(Self::archive_name(&job.name, now));
        let guard = TempFileGuard::new(temp_path(&final_path));

        let written = self.write_entries(guard.path(), &entries)?;
        if written == 0 {
            Err(ArchiveError::no_content(&job.name))?
        }

        Self::verify(guard.path(), written)?;

        fs::rename(guard.path(), &final_path)
            .map_err(|err| IOError::rename_file_failed(guard.path(), &final_path, err))?;
        guard.disarm();

        let size = fs::metadata(&final_path)
            .map_err(|err| IOError::get_metadata_failed(&final_path, err))?
            .len();

        self.reporter.report(&ArchiveLog::Published {
            path: final_path.clone(),
            entries: written,
        });

        Ok(ArchiveOutcome {
            path: final_path,
            size,
            entries: written,
        })
    }

    fn options(&self) -> SimpleFileOptions {
        if self.compression_level == 0 {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        } else {
            SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(self.compression_level))
                .large_file(true)
        }
    }

    fn write_entries(&self, temp: &Path, entries: &[SourceEntry]) -> Result<usize, Error> {
        let file = File::create(temp).map_err(|err| write_failed(temp, err))?;
        let mut zip = ZipWriter::new(file);
        let options = self.options();

        let mut written = 0;
        for entry in entries {
            let contents = match fs::read(&entry.path) {
                Ok(contents) => contents,
                Err(err) => {
                    self.reporter.report(&ArchiveLog::FileSkipped {
                        path: entry.path.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            zip.start_file(entry.entry_name.as_str(), options)
                .map_err(|err| write_failed(temp, err))?;
            zip.write_all(&contents).map_err(|err| write_failed(temp, err))?;
            written += 1;
        }

        let file = zip.finish().map_err(|err| write_failed(temp, err))?;
        file.sync_all().map_err(|err| write_failed(temp, err))?;
        Ok(written)
    }

    /// Reads every entry to the end, which validates each CRC.
    pub fn verify(path: &Path, expected_entries: usize) -> Result<(), Error> {
        let file = File::open(path).map_err(|err| ArchiveError::integrity_check_failed(path, err))?;
        let mut archive = ZipArchive::new(BufReader::new(file))
            .map_err(|err| ArchiveError::integrity_check_failed(path, err))?;

        if archive.len() != expected_entries {
            Err(ArchiveError::integrity_check_failed(
                path,
                format!("expected {} entries, found {}", expected_entries, archive.len()),
            ))?
        }

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|err| ArchiveError::integrity_check_failed(path, err))?;
            io::copy(&mut entry, &mut io::sink())
                .map_err(|err| ArchiveError::integrity_check_failed(path, err))?;
        }
        Ok(())
    }
}

fn write_failed(path: &Path, err: impl Into<WriteFailure>) -> ArchiveError {
    let path = PathBuf::from(path);
    match err.into() {
        WriteFailure::Io(err) if is_disk_full(&err) => ArchiveError::disk_full(path, err),
        WriteFailure::Io(err) => ArchiveError::write_archive_failed(path, err),
        WriteFailure::Zip(err) => ArchiveError::write_archive_failed(path, err),
    }
}

enum WriteFailure {
    Io(io::Error),
    Zip(zip::result::ZipError),
}

impl From<io::Error> for WriteFailure {
    fn from(err: io::Error) -> Self {
        WriteFailure::Io(err)
    }
}

impl From<zip::result::ZipError> for WriteFailure {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(err) => WriteFailure::Io(err),
            err => WriteFailure::Zip(err),
        }
    }
}

fn is_disk_full(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::StorageFull
}
