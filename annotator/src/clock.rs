//! Source of the current date for new annotations.

use chrono::NaiveDate;

/// Provides today's date.
pub trait Clock {
    /// Current local date.
    fn today(&self) -> NaiveDate;
}

/// Clock reading the system local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Clock that always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
