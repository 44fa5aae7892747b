use crate::core::infrastructure::reporter::Reporter;
use crate::model::error::job::JobError;
use crate::model::error::system::SystemError;
use crate::model::error::Error;
use crate::model::job::Job;
use crate::model::log::job::JobLog;
use crate::utils::atomic_file::write_atomic;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Ordered job list persisted as one JSON array.
pub struct JobStore {
    path: PathBuf,
    jobs: Vec<Job>,
    reporter: Reporter,
}

impl JobStore {
    /// Missing, empty or unparsable files all start with an empty list.
    pub fn load(path: impl AsRef<Path>, reporter: Reporter) -> Self {
        let path = path.as_ref().to_path_buf();
        let jobs = Self::read(&path, &reporter);
        Self {
            path,
            jobs,
            reporter,
        }
    }

    fn read(path: &Path, reporter: &Reporter) -> Vec<Job> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                reporter.report(&JobLog::JobsFileMissing {
                    path: path.to_path_buf(),
                });
                return Vec::new();
            }
            Err(err) => {
                reporter.report(&JobError::parse_failed(path, err));
                reporter.report(&JobLog::JobsReset);
                return Vec::new();
            }
        };

        if contents.trim().is_empty() {
            reporter.report(&JobLog::JobsFileEmpty {
                path: path.to_path_buf(),
            });
            return Vec::new();
        }

        match serde_json::from_str::<Vec<Job>>(&contents) {
            Ok(jobs) => {
                reporter.report(&JobLog::Loaded {
                    path: path.to_path_buf(),
                    count: jobs.len(),
                });
                jobs
            }
            Err(err) => {
                reporter.report(&JobError::parse_failed(path, err));
                reporter.report(&JobLog::JobsReset);
                Vec::new()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn get(&self, index: usize) -> Option<&Job> {
        self.jobs.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.name == name)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn save(&self) -> Result<(), Error> {
        Self::persist(&self.path, &self.jobs)
    }

    pub fn add(&mut self, job: Job) -> Result<(), Error> {
        Self::validate_name(&job)?;
        if self.jobs.iter().any(|existing| existing.name == job.name) {
            Err(JobError::duplicate_name(&job.name))?
        }

        let name = job.name.clone();
        let mut jobs = self.jobs.clone();
        jobs.push(job);
        self.commit(jobs)?;
        self.reporter.report(&JobLog::Added { name });
        Ok(())
    }

    /// Returns the job that was replaced.
    pub fn update(&mut self, index: usize, job: Job) -> Result<Job, Error> {
        Self::validate_name(&job)?;
        if index >= self.jobs.len() {
            Err(JobError::not_found(index))?
        }
        let collides = self
            .jobs
            .iter()
            .enumerate()
            .any(|(position, existing)| position != index && existing.name == job.name);
        if collides {
            Err(JobError::duplicate_name(&job.name))?
        }

        let name = job.name.clone();
        let mut jobs = self.jobs.clone();
        let previous = std::mem::replace(&mut jobs[index], job);
        self.commit(jobs)?;
        self.reporter.report(&JobLog::Updated { name });
        Ok(previous)
    }

    pub fn delete(&mut self, index: usize) -> Result<Job, Error> {
        if index >= self.jobs.len() {
            Err(JobError::not_found(index))?
        }

        let mut jobs = self.jobs.clone();
        let removed = jobs.remove(index);
        self.commit(jobs)?;
        self.reporter.report(&JobLog::Deleted {
            name: removed.name.clone(),
        });
        Ok(removed)
    }

    fn commit(&mut self, jobs: Vec<Job>) -> Result<(), Error> {
        Self::persist(&self.path, &jobs)?;
        self.jobs = jobs;
        Ok(())
    }

    fn persist(path: &Path, jobs: &[Job]) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(jobs)
            .map_err(|err| SystemError::serialize_failed("job list", err))?;
        write_atomic(path, json.as_bytes()).map_err(|err| JobError::save_failed(path, err))?;
        Ok(())
    }

    fn validate_name(job: &Job) -> Result<(), Error> {
        if job.name.trim().is_empty() {
            Err(JobError::EmptyName)?
        }
        Ok(())
    }
}
