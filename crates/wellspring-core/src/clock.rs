//! Clock abstraction for day-boundary logic.
//!
//! The engine never reads the system clock directly. Every streak, refill
//! and unlock evaluation goes through [`Clock::today`], so tests (and the
//! CLI's `--as-of` override) can pin or advance the calendar date.

use std::cell::Cell;

use chrono::{Days, Local, NaiveDate};

/// Supplies the current calendar date.
///
/// Calendar dates are timezone-naive year-month-day values; "same day"
/// comparisons never involve a time-of-day component.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the local system date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed date, advanceable by whole days.
///
/// Used by tests to exercise day-boundary behavior deterministically, and
/// by the CLI to evaluate progression as of an arbitrary date.
#[derive(Debug)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            today: Cell::new(date),
        }
    }

    /// Pin the clock to a new date.
    pub fn set(&self, date: NaiveDate) {
        self.today.set(date);
    }

    /// Advance the clock by `days` whole days.
    pub fn advance(&self, days: u64) {
        if let Some(next) = self.today.get().checked_add_days(Days::new(days)) {
            self.today.set(next);
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

// Lets callers keep a handle to a shared clock (e.g. advance a FixedClock
// after handing it to the engine).
impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_clock_returns_pinned_date() {
        let clock = FixedClock::new(date(2026, 3, 14));
        assert_eq!(clock.today(), date(2026, 3, 14));
    }

    #[test]
    fn test_fixed_clock_advance_crosses_month_boundary() {
        let clock = FixedClock::new(date(2026, 1, 31));
        clock.advance(1);
        assert_eq!(clock.today(), date(2026, 2, 1));
    }

    #[test]
    fn test_fixed_clock_set_overrides() {
        let clock = FixedClock::new(date(2026, 1, 1));
        clock.set(date(2025, 12, 25));
        assert_eq!(clock.today(), date(2025, 12, 25));
    }
}
