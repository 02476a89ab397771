//! Calendar-date source for analytics bucketing.
//!
//! The day-key is re-derived on every accumulation call, so a session that
//! runs across midnight splits its seconds between two days.

use chrono::{Local, NaiveDate};

pub const DAILY_FMT: &str = "%Y-%m-%d";

pub trait Clock: Send + Sync {
    /// Local calendar date right now.
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DAILY_FMT).to_string()
}

pub fn current_date_key(clock: &dyn Clock) -> String {
    date_key(clock.today())
}
