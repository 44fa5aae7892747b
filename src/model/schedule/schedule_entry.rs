use crate::model::schedule::interval::Interval;
use chrono::{DateTime, Local};

/// Display row for one installed trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub name: String,
    pub interval: Interval,
    pub next_run_at: DateTime<Local>,
}

impl ScheduleEntry {
    pub fn interval_seconds(&self) -> u64 {
        self.interval.as_secs()
    }

    pub fn is_due(&self, now: DateTime<Local>) -> bool {
        now >= self.next_run_at
    }
}
