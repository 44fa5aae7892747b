use crate::model::job::Job;
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Manual,
    Scheduled,
    Overdue,
}

impl Trigger {
    pub fn is_manual(&self) -> bool {
        matches!(self, Trigger::Manual)
    }
}

/// Detached copy of a job handed to the backup worker.
#[derive(Debug, Clone)]
pub struct QueueRequest {
    pub job: Job,
    pub trigger: Trigger,
    pub requested_at: DateTime<Local>,
}

impl QueueRequest {
    pub fn new(job: &Job, trigger: Trigger, requested_at: DateTime<Local>) -> Self {
        Self {
            job: job.clone(),
            trigger,
            requested_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.job.name
    }
}

pub enum QueueMessage {
    Request(QueueRequest),
    Poison,
}
