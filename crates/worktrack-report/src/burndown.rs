//! Burndown series
//!
//! Remaining weight per day over a project's period: an ideal straight line
//! from the total weight down to zero at the end date, and the actual
//! remaining weight given completion dates. Actual values stop at `today`.

use crate::range::DateRange;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use worktrack_model::WorkItem;

/// Days drawn past the end date
pub const DEFAULT_TAIL_DAYS: u32 = 5;

/// One day of a burndown chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurndownPoint {
    /// Calendar day
    pub date: NaiveDate,
    /// `MM/dd`
    pub label: String,
    /// Planned remaining weight, one decimal
    pub ideal: f64,
    /// Remaining weight as completed, one decimal; `None` after today
    pub actual: Option<f64>,
}

/// Burndown with the dashboard's five-day tail.
#[must_use]
pub fn burndown(items: &[WorkItem], period: DateRange, today: NaiveDate) -> Vec<BurndownPoint> {
    burndown_with_tail(items, period, today, DEFAULT_TAIL_DAYS)
}

/// One point per day from `period.start` to `period.end + tail_days`.
///
/// An item counts as burned from its `actual_end_date` on, and only once its
/// status is complete. Empty when there are no items.
#[must_use]
pub fn burndown_with_tail(
    items: &[WorkItem],
    period: DateRange,
    today: NaiveDate,
    tail_days: u32,
) -> Vec<BurndownPoint> {
    if items.is_empty() {
        return Vec::new();
    }

    let total: f64 = items.iter().map(WorkItem::weight).sum();
    let span = period.span_days();
    #[allow(clippy::cast_precision_loss)]
    let daily_burn = total / span.max(1) as f64;

    let mut done: Vec<(NaiveDate, f64)> = items
        .iter()
        .filter(|i| i.status.is_complete())
        .filter_map(|i| i.actual_end_date.map(|d| (d, i.weight())))
        .collect();
    done.sort_by_key(|(d, _)| *d);

    let days = u64::try_from(span).unwrap_or(0) + u64::from(tail_days);
    let mut points = Vec::new();
    let mut burned = 0.0;
    let mut next = 0;

    for offset in 0..=days {
        let Some(date) = period.start.checked_add_days(Days::new(offset)) else {
            break;
        };
        while next < done.len() && done[next].0 <= date {
            burned += done[next].1;
            next += 1;
        }

        #[allow(clippy::cast_precision_loss)]
        let ideal = (total - daily_burn * offset as f64).max(0.0);
        points.push(BurndownPoint {
            date,
            label: date.format("%m/%d").to_string(),
            ideal: one_decimal(ideal),
            actual: (date <= today).then(|| one_decimal(total - burned)),
        });
    }

    tracing::debug!("Burndown: {} points, total weight {}", points.len(), total);
    points
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use worktrack_model::ItemStatus;
    use worktrack_test_utils::{day, leaf};

    fn period() -> DateRange {
        DateRange::new(day(2025, 1, 1), day(2025, 1, 11))
    }

    #[test]
    fn empty_items_no_points() {
        assert!(burndown(&[], period(), day(2025, 1, 5)).is_empty());
    }

    #[test]
    fn ideal_line_runs_to_zero_then_flat() {
        let items = vec![leaf("a", 60.0, 1.0, 0.0), leaf("b", 40.0, 1.0, 0.0)];
        let points = burndown(&items, period(), day(2025, 1, 1));

        assert_eq!(points.len(), 16);
        assert_eq!(points[0].ideal, 100.0);
        assert_eq!(points[1].ideal, 90.0);
        assert_eq!(points[10].ideal, 0.0);
        assert_eq!(points[15].ideal, 0.0);
        assert_eq!(points[15].label, "01/16");
    }

    #[test]
    fn actual_burns_on_completion_and_stops_at_today() {
        let items = vec![
            leaf("a", 60.0, 1.0, 1.0)
                .with_status(ItemStatus::Complete)
                .with_actual_end(day(2025, 1, 3)),
            // Finished date recorded but not marked complete: not burned.
            leaf("b", 40.0, 1.0, 1.0).with_actual_end(day(2025, 1, 2)),
        ];
        let points = burndown(&items, period(), day(2025, 1, 5));

        assert_eq!(points[1].actual, Some(100.0));
        assert_eq!(points[2].actual, Some(40.0));
        assert_eq!(points[4].actual, Some(40.0));
        assert_eq!(points[5].actual, None);
    }

    #[test]
    fn single_day_period_burns_whole_weight_in_one_step() {
        let items = vec![leaf("a", 10.0, 1.0, 0.0)];
        let points = burndown_with_tail(&items, DateRange::new(day(2025, 1, 1), day(2025, 1, 1)), day(2025, 1, 1), 0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].ideal, 10.0);
    }
}
