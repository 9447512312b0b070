use chrono::{Local, NaiveDate};

/// Clock abstracts access to the current calendar day so the past-date guard
/// stays deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local calendar day.
    fn today(&self) -> NaiveDate;
}

/// Real-time clock backed by the local system time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
