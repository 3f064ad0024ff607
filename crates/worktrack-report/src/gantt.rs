//! Schedule bars for Gantt rows
//!
//! Positions are whole days relative to the chart start; the renderer turns
//! them into pixels.

use crate::range::DateRange;
use chrono::NaiveDate;
use serde::Serialize;
use worktrack_core::{build_forest, flatten_with_depth};
use worktrack_model::{ItemStatus, WorkItem};

/// One Gantt row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleBar {
    /// Item identifier
    pub id: String,
    /// Item name
    pub name: String,
    /// Nesting depth, 0 for roots
    pub depth: usize,
    /// Item status, drives the bar colour
    pub status: ItemStatus,
    /// Days from the chart start to the bar start
    pub offset_days: i64,
    /// Bar length in days, at least 1 (the end day is included)
    pub span_days: i64,
}

/// Bars for every item of a project's tree, in display order.
///
/// A bar runs from the planned start (or the planned end when no start is
/// set) through the planned end. Undated items sit at the chart start with a
/// one-day bar.
#[must_use]
pub fn schedule_bars(items: &[WorkItem], chart: DateRange) -> Vec<ScheduleBar> {
    flatten_with_depth(&build_forest(items))
        .into_iter()
        .map(|row| {
            let end = row.item.plan_end_date;
            let start = row.item.plan_start_date.or(end);
            let offset_days = offset(chart.start, start);
            let span_days = (offset(chart.start, end) - offset_days + 1).max(1);
            ScheduleBar {
                id: row.item.id,
                name: row.item.name,
                depth: row.depth,
                status: row.item.status,
                offset_days,
                span_days,
            }
        })
        .collect()
}

fn offset(origin: NaiveDate, day: Option<NaiveDate>) -> i64 {
    day.map_or(0, |d| (d - origin).num_days())
}

/// Number of day columns the chart needs, end day included
#[must_use]
pub fn chart_days(chart: DateRange) -> i64 {
    chart.span_days() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use worktrack_test_utils::{day, sample_project};

    #[test]
    fn bars_follow_tree_order_and_dates() {
        let project = sample_project();
        let chart = DateRange::new(day(2025, 1, 1), day(2025, 3, 31));
        let bars = schedule_bars(&project.items, chart);

        let shape: Vec<(&str, usize, i64, i64)> = bars
            .iter()
            .map(|b| (b.id.as_str(), b.depth, b.offset_days, b.span_days))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("design", 0, 0, 15),
                ("build", 0, 15, 59),
                ("frame", 1, 50, 1),
                ("roof", 1, 73, 1),
                ("handover", 0, 89, 1),
            ]
        );
        assert_eq!(chart_days(chart), 90);
    }

    #[test]
    fn undated_item_sits_at_origin() {
        let chart = DateRange::new(day(2025, 1, 1), day(2025, 1, 31));
        let bars = schedule_bars(&[WorkItem::new("x")], chart);
        assert_eq!((bars[0].offset_days, bars[0].span_days), (0, 1));
    }
}
