//! Inclusive calendar ranges

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day
    pub start: NaiveDate,
    /// Last day
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range; `start` and `end` are swapped if given backwards
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// Check if `day` falls inside the range
    #[inline]
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Same as [`contains`](Self::contains) for an optional day; `None` is outside
    #[inline]
    #[must_use]
    pub fn contains_opt(&self, day: Option<NaiveDate>) -> bool {
        day.is_some_and(|d| self.contains(d))
    }

    /// Number of days from start to end
    #[inline]
    #[must_use]
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn inclusive_bounds() {
        let range = DateRange::new(day(5), day(10));
        assert!(range.contains(day(5)));
        assert!(range.contains(day(10)));
        assert!(!range.contains(day(11)));
        assert!(!range.contains_opt(None));
        assert_eq!(range.span_days(), 5);
    }

    #[test]
    fn backwards_bounds_are_swapped() {
        assert_eq!(DateRange::new(day(10), day(5)), DateRange::new(day(5), day(10)));
    }
}
