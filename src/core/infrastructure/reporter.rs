use crate::interface::event_sink::{EventRecord, EventSink};
use crate::interface::loggable::Loggable;
use chrono::Local;
use std::sync::Arc;

/// Forwards engine events to tracing and, when attached, to an event sink.
#[derive(Clone, Default)]
pub struct Reporter {
    sink: Option<Arc<dyn EventSink>>,
}

impl Reporter {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink: Some(sink) }
    }

    pub fn detached() -> Self {
        Self { sink: None }
    }

    pub fn report(&self, event: &impl Loggable) {
        event.log();
        if let Some(sink) = &self.sink {
            sink.emit(EventRecord {
                severity: event.severity(),
                message: event.to_string(),
                at: Local::now(),
            });
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::model::log::queue::QueueLog;
    use crate::model::log::severity::Severity;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingSink {
        pub records: Mutex<Vec<EventRecord>>,
    }

    impl RecordingSink {
        pub fn messages(&self) -> Vec<String> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .map(|record| record.message.clone())
                .collect()
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&self, record: EventRecord) {
            self.records.lock().unwrap().push(record);
        }
    }

    #[test]
    fn forwards_severity_and_message() {
        let sink = Arc::new(RecordingSink::default());
        let reporter = Reporter::new(sink.clone());

        reporter.report(&QueueLog::BackupFailed {
            name: String::from("ragnarok"),
            reason: String::from("disk full"),
        });

        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Error);
        assert_eq!(records[0].message, "Backup failed for ragnarok: disk full");
    }
}
