use crate::core::infrastructure::reporter::Reporter;
use crate::model::backup::queue_request::{QueueRequest, Trigger};
use crate::model::error::Error;
use crate::model::job::Job;
use crate::model::log::schedule::ScheduleLog;
use crate::model::schedule::interval::Interval;
use crate::model::schedule::schedule_entry::ScheduleEntry;
use chrono::{DateTime, Local};

struct JobTrigger {
    job: Job,
    interval: Interval,
    next_run_at: DateTime<Local>,
}

/// Per-job periodic triggers, polled by the control task.
pub struct IntervalScheduler {
    triggers: Vec<JobTrigger>,
    reporter: Reporter,
}

impl IntervalScheduler {
    pub fn new(reporter: Reporter) -> Self {
        Self {
            triggers: Vec::new(),
            reporter,
        }
    }

    /// Replaces any trigger of the same name. The first run is due one
    /// interval after `anchor`.
    pub fn install(&mut self, job: &Job, anchor: DateTime<Local>) -> Result<DateTime<Local>, Error> {
        let interval = match Interval::new(job.interval_value, job.interval_unit) {
            Ok(interval) => interval,
            Err(err) => {
                self.reporter.report(&ScheduleLog::ScheduleFailed {
                    name: job.name.clone(),
                    reason: err.to_string(),
                });
                Err(err)?
            }
        };

        self.triggers.retain(|trigger| trigger.job.name != job.name);
        let next_run_at = anchor + interval.as_delta();
        self.triggers.push(JobTrigger {
            job: job.clone(),
            interval,
            next_run_at,
        });

        self.reporter.report(&ScheduleLog::JobScheduled {
            name: job.name.clone(),
            seconds: interval.as_secs(),
            value: interval.value(),
            unit: interval.unit().to_string(),
        });
        Ok(next_run_at)
    }

    pub fn cancel(&mut self, name: &str) -> bool {
        let before = self.triggers.len();
        self.triggers.retain(|trigger| trigger.job.name != name);
        let removed = self.triggers.len() != before;
        if removed {
            self.reporter.report(&ScheduleLog::JobUnscheduled {
                name: name.to_string(),
            });
        }
        removed
    }

    /// Fires every due trigger once, however many intervals have elapsed.
    pub fn tick(&mut self, now: DateTime<Local>) -> Vec<QueueRequest> {
        let mut fired = Vec::new();
        for trigger in self.triggers.iter_mut().filter(|trigger| now >= trigger.next_run_at) {
            self.reporter.report(&ScheduleLog::TriggerFired {
                name: trigger.job.name.clone(),
            });
            fired.push(QueueRequest::new(&trigger.job, Trigger::Scheduled, now));
            trigger.next_run_at = now + trigger.interval.as_delta();
        }
        fired
    }

    pub fn next_run_at(&self, name: &str) -> Option<DateTime<Local>> {
        self.find(name).map(|trigger| trigger.next_run_at)
    }

    pub fn set_next_run_at(&mut self, name: &str, at: DateTime<Local>) -> bool {
        match self.triggers.iter_mut().find(|trigger| trigger.job.name == name) {
            Some(trigger) => {
                trigger.next_run_at = at;
                true
            }
            None => false,
        }
    }

    pub fn interval(&self, name: &str) -> Option<Interval> {
        self.find(name).map(|trigger| trigger.interval)
    }

    pub fn status(&self) -> Vec<ScheduleEntry> {
        let mut entries: Vec<_> = self
            .triggers
            .iter()
            .map(|trigger| ScheduleEntry {
                name: trigger.job.name.clone(),
                interval: trigger.interval,
                next_run_at: trigger.next_run_at,
            })
            .collect();
        entries.sort_by_key(|entry| entry.next_run_at);
        entries
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    fn find(&self, name: &str) -> Option<&JobTrigger> {
        self.triggers.iter().find(|trigger| trigger.job.name == name)
    }
}
