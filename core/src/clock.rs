//! Injected time provider — the "now" anchor for the 30-day window.
//!
//! Every read path takes its dates from a Clock so tests can pin "today"
//! instead of depending on wall-clock time.

use crate::types::WINDOW_DAYS;
use chrono::{Duration, Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// The current calendar date at the request site.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock dates. The production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen at a fixed date (used in tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Start of the trailing window ending at `today`, inclusive of today.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(WINDOW_DAYS)
}
