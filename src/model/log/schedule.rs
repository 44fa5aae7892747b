use crate::model::log::severity::Severity;
use macros::loggable;

loggable! {
    ScheduleLog {
        #[error("Scheduled job: {name} to run every {seconds} seconds ({value} {unit})")]
        JobScheduled { name: String, seconds: u64, value: i64, unit: String } => Severity::Info,

        #[error("Cleared schedule for job: {name}")]
        JobUnscheduled { name: String } => Severity::Info,

        #[error("Failed to schedule job {name}: {reason}")]
        ScheduleFailed { name: String, reason: String } => Severity::Error,

        #[error("Job {name} is due - executing now")]
        TriggerFired { name: String } => Severity::Info,

        #[error("Monthly archive check scheduled daily at {time}")]
        MonthlyCheckScheduled { time: String } => Severity::Info,

        #[error("[{name}] No previous backup found, running now")]
        OverdueNeverBackedUp { name: String } => Severity::Info,

        #[error("[{name}] Significantly overdue since {due_at}, running now")]
        OverdueRequeued { name: String, due_at: String } => Severity::Info,

        #[error("[{name}] Overdue check failed: {reason}")]
        OverdueJobFailed { name: String, reason: String } => Severity::Error,

        #[error("Overdue check completed, {requeued} job(s) requeued")]
        OverdueCheckCompleted { requeued: usize } => Severity::Info,
    }
}
