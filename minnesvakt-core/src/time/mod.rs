//! ## minnesvakt-core::time
//! **Clock abstraction for date capture**
//!
//! The registry's date operations capture "now" through the [`Clock`] trait
//! instead of reading the wall clock directly, so tests and simulations can
//! substitute a deterministic time source.

use std::cell::Cell;

use chrono::{Duration, Local, NaiveDateTime};

/// A source of the current local time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time source backed by `chrono::Local`.
///
/// Not reentrant-safe across threads by contract of the core (the whole
/// registry is single-threaded); this type itself is stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Deterministic clock pinned to a caller-chosen instant.
///
/// The instant only moves when the owner calls [`FixedClock::advance`],
/// which makes date-dependent behavior reproducible in tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self {
            instant: Cell::new(instant),
        }
    }

    /// Moves the clock forward by whole seconds.
    pub fn advance(&self, seconds: i64) {
        let next = self.instant.get() + Duration::seconds(seconds);
        self.instant.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn fixed_clock_holds_and_advances() {
        let start = NaiveDate::from_ymd_opt(2016, 5, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let clock = FixedClock::new(start);

        assert_eq!(clock.now(), start);
        clock.advance(90);
        assert_eq!(clock.now(), start + Duration::seconds(90));
    }
}
