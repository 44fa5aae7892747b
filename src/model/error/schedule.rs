use crate::model::log::severity::Severity;
use macros::traceable;

traceable! {
    ScheduleError {
        #[no_source]
        #[error("Invalid interval: {value} {unit} (interval value must be positive)")]
        InvalidInterval { value: i64, unit: String } => Severity::Warning,
    }
}
