use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime};

/// Daily check at a fixed time that reports whether the monthly rollup is due.
pub struct MonthlyTrigger {
    check_time: NaiveTime,
    last_checked: Option<NaiveDate>,
}

impl MonthlyTrigger {
    pub fn new(check_time: NaiveTime) -> Self {
        Self {
            check_time,
            last_checked: None,
        }
    }

    pub fn check_time(&self) -> NaiveTime {
        self.check_time
    }

    /// True at most once per day, and only on the first of the month.
    pub fn poll(&mut self, now: DateTime<Local>) -> bool {
        let today = now.date_naive();
        if now.time() < self.check_time || self.last_checked == Some(today) {
            return false;
        }
        self.last_checked = Some(today);
        today.day() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 4, day, hour, minute, 0).unwrap()
    }

    fn trigger() -> MonthlyTrigger {
        MonthlyTrigger::new(NaiveTime::from_hms_opt(23, 0, 0).unwrap())
    }

    #[test]
    fn fires_once_on_the_first_after_check_time() {
        let mut trigger = trigger();
        assert!(!trigger.poll(at(1, 22, 59)));
        assert!(trigger.poll(at(1, 23, 0)));
        assert!(!trigger.poll(at(1, 23, 30)));
    }

    #[test]
    fn checks_daily_but_fires_only_on_the_first() {
        let mut trigger = trigger();
        assert!(!trigger.poll(at(2, 23, 5)));
        assert!(!trigger.poll(at(15, 23, 5)));
    }
}
