//! Time source for date-sensitive habit logic.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, Utc};

pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date on the device.
    fn today(&self) -> NaiveDate;
}

/// Wall clock using the local time zone for calendar dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a date until moved. Clones share the same date.
#[derive(Debug, Clone)]
pub struct ManualClock {
    today: Arc<Mutex<NaiveDate>>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Arc::new(Mutex::new(today)),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        if let Ok(mut today) = self.today.lock() {
            *today = date;
        }
    }

    pub fn advance_days(&self, days: u64) {
        if let Ok(mut today) = self.today.lock() {
            if let Some(next) = today.checked_add_days(Days::new(days)) {
                *today = next;
            }
        }
    }
}

impl Clock for ManualClock {
    /// Midnight UTC of the pinned date.
    fn now(&self) -> DateTime<Utc> {
        self.today().and_time(NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.today
            .lock()
            .map(|today| *today)
            .unwrap_or(NaiveDate::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_date() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let clock = ManualClock::new(start);
        let handle = clock.clone();
        handle.advance_days(2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert_eq!(clock.now().date_naive(), clock.today());
    }

    #[test]
    fn set_moves_to_any_date() {
        let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        clock.set(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(clock.today().to_string(), "2023-12-31");
    }
}
