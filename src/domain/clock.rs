//! Wall-clock abstraction used for day-scoped cache keys

use std::fmt::Debug;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};

/// Source of "now" and of the current calendar day.
///
/// The calendar day is what rolls price cache keys over at midnight, so it is evaluated
/// in the deployment's timezone rather than in UTC.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    /// Uses the host's local timezone for the day boundary
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a fixed UTC offset (in minutes) for the day boundary
    pub fn with_utc_offset_minutes(minutes: i32) -> Self {
        Self {
            offset: FixedOffset::east_opt(minutes * 60),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
            None => Local::now().date_naive(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_offset_clock_uses_offset_day() {
        let ist = SystemClock::with_utc_offset_minutes(330);
        let expected = Utc::now()
            .with_timezone(&FixedOffset::east_opt(330 * 60).unwrap())
            .date_naive();

        assert_eq!(ist.today(), expected);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = mock::ManualClock::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        clock.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
    }
}
