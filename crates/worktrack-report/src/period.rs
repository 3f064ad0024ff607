//! Weekly and monthly progress series
//!
//! Each bucket collects the items whose planned finish falls inside it and
//! reports how many were planned, how many are complete, and their weighted
//! progress. Buckets are returned oldest first and end with the one that
//! contains `today`.

use crate::range::DateRange;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use worktrack_core::weighted_progress;
use worktrack_model::WorkItem;

/// Weeks shown on the dashboard
pub const DEFAULT_WEEKS: u32 = 4;
/// Months shown on the dashboard
pub const DEFAULT_MONTHS: u32 = 6;

/// Progress figures for one reporting bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodProgress {
    /// `MM/dd~MM/dd` for weeks, `yyyy-MM` for months
    pub label: String,
    /// Bucket bounds, inclusive
    pub range: DateRange,
    /// Items planned to finish in the bucket
    pub planned: usize,
    /// Of those, items marked complete
    pub completed: usize,
    /// Weighted progress of the bucket's items, 0..=100
    pub rate: u8,
}

/// Figures for the items planned to finish inside `range`.
#[must_use]
pub fn period_progress(items: &[WorkItem], range: DateRange, label: impl Into<String>) -> PeriodProgress {
    let bucket: Vec<WorkItem> = items
        .iter()
        .filter(|item| range.contains_opt(item.plan_end_date))
        .cloned()
        .collect();

    PeriodProgress {
        label: label.into(),
        range,
        planned: bucket.len(),
        completed: bucket.iter().filter(|i| i.status.is_complete()).count(),
        rate: weighted_progress(&bucket),
    }
}

/// The last `weeks` Monday-to-Sunday weeks up to and including `today`'s.
#[must_use]
pub fn weekly_progress(items: &[WorkItem], today: NaiveDate, weeks: u32) -> Vec<PeriodProgress> {
    let this_monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));

    (0..weeks)
        .rev()
        .filter_map(|back| {
            let start = this_monday.checked_sub_days(Days::new(7 * u64::from(back)))?;
            let end = start.checked_add_days(Days::new(6))?;
            let label = format!("{}~{}", start.format("%m/%d"), end.format("%m/%d"));
            Some(period_progress(items, DateRange::new(start, end), label))
        })
        .collect()
}

/// The last `months` calendar months up to and including `today`'s.
#[must_use]
pub fn monthly_progress(items: &[WorkItem], today: NaiveDate, months: u32) -> Vec<PeriodProgress> {
    let first_of_month = today - Days::new(u64::from(today.day0()));

    (0..months)
        .rev()
        .filter_map(|back| {
            let start = first_of_month.checked_sub_months(Months::new(back))?;
            let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
            let label = start.format("%Y-%m").to_string();
            Some(period_progress(items, DateRange::new(start, end), label))
        })
        .collect()
}
