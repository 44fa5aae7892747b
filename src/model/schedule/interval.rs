use crate::model::error::schedule::ScheduleError;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl IntervalUnit {
    pub fn seconds(&self) -> u64 {
        match self {
            IntervalUnit::Seconds => 1,
            IntervalUnit::Minutes => 60,
            IntervalUnit::Hours => 60 * 60,
            IntervalUnit::Days => 24 * 60 * 60,
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IntervalUnit::Seconds => "seconds",
            IntervalUnit::Minutes => "minutes",
            IntervalUnit::Hours => "hours",
            IntervalUnit::Days => "days",
        };
        f.write_str(label)
    }
}

// A century keeps every next-run computation inside chrono's range.
const MAX_INTERVAL_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

/// A validated, strictly positive backup cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    value: i64,
    unit: IntervalUnit,
    delta: TimeDelta,
}

impl Interval {
    pub fn new(value: i64, unit: IntervalUnit) -> Result<Self, ScheduleError> {
        let seconds = interval_to_seconds(value, unit)?;
        let delta = i64::try_from(seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| invalid(value, unit))?;
        Ok(Self { value, unit, delta })
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn unit(&self) -> IntervalUnit {
        self.unit
    }

    pub fn as_secs(&self) -> u64 {
        self.delta.num_seconds().unsigned_abs()
    }

    pub fn as_delta(&self) -> TimeDelta {
        self.delta
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

pub fn interval_to_seconds(value: i64, unit: IntervalUnit) -> Result<u64, ScheduleError> {
    if value <= 0 {
        return Err(invalid(value, unit));
    }
    value
        .unsigned_abs()
        .checked_mul(unit.seconds())
        .filter(|seconds| *seconds <= MAX_INTERVAL_SECONDS)
        .ok_or_else(|| invalid(value, unit))
}

fn invalid(value: i64, unit: IntervalUnit) -> ScheduleError {
    ScheduleError::invalid_interval(value, unit.to_string())
}
