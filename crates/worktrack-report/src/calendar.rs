//! Month calendar and daily agenda
//!
//! The grid always covers whole Sunday-to-Saturday weeks, so it starts in the
//! previous month and ends in the next one when the month does not line up.

use crate::range::DateRange;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use worktrack_model::{Issue, Project, WorkItem};

/// Markers for one calendar cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayStatus {
    /// Items whose planned interval covers the day
    pub item_count: usize,
    /// At least one issue was created that day
    pub has_issue: bool,
}

/// One cell of a month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    /// Calendar day
    pub date: NaiveDate,
    /// False for the leading and trailing days of neighbouring months
    pub in_month: bool,
    /// Markers
    pub status: DayStatus,
}

/// An item scheduled on the agenda day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaItem {
    /// Owning project
    pub project_id: String,
    /// Owning project's name
    pub project_name: String,
    /// The item, without children
    pub item: WorkItem,
}

/// An issue raised on the agenda day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaIssue {
    /// Owning project
    pub project_id: String,
    /// Owning project's name
    pub project_name: String,
    /// The issue
    pub issue: Issue,
}

/// Everything happening on one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAgenda {
    /// The day
    pub date: NaiveDate,
    /// Scheduled items, in project then item order
    pub items: Vec<AgendaItem>,
    /// Issues created that day, in project then issue order
    pub issues: Vec<AgendaIssue>,
}

/// Days of the Sunday-start grid for the month containing `month`.
///
/// Always a multiple of seven days long.
#[must_use]
pub fn month_grid(month: NaiveDate) -> DateRange {
    let first = month - Days::new(u64::from(month.day0()));
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);

    let lead = u64::from(first.weekday().num_days_from_sunday());
    let trail = 6 - u64::from(last.weekday().num_days_from_sunday());
    DateRange::new(
        first.checked_sub_days(Days::new(lead)).unwrap_or(first),
        last.checked_add_days(Days::new(trail)).unwrap_or(last),
    )
}

/// Item count and issue marker for `date` across every project.
///
/// An item counts when both planned dates are set and `date` lies between
/// them, inclusive.
#[must_use]
pub fn day_status(projects: &[Project], date: NaiveDate) -> DayStatus {
    let item_count = projects
        .iter()
        .flat_map(|p| &p.items)
        .filter(|i| within(i.plan_start_date, i.plan_end_date, date))
        .count();
    let has_issue = projects
        .iter()
        .flat_map(|p| &p.issues)
        .any(|i| i.created_on() == Some(date));

    DayStatus { item_count, has_issue }
}

/// The full grid for the month containing `month`, each cell with its markers.
#[must_use]
pub fn calendar_month(projects: &[Project], month: NaiveDate) -> Vec<CalendarDay> {
    let grid = month_grid(month);
    grid.start
        .iter_days()
        .take_while(|d| *d <= grid.end)
        .map(|date| CalendarDay {
            date,
            in_month: date.year() == month.year() && date.month() == month.month(),
            status: day_status(projects, date),
        })
        .collect()
}

/// Items and issues for `date`.
///
/// An item is on the agenda when its planned interval covers the day, or
/// failing that when its actual interval does. Work started but not yet
/// finished runs through `today`.
#[must_use]
pub fn day_agenda(projects: &[Project], date: NaiveDate, today: NaiveDate) -> DayAgenda {
    let mut items = Vec::new();
    let mut issues = Vec::new();

    for project in projects {
        for item in &project.items {
            let planned = within(item.plan_start_date, item.plan_end_date, date);
            let worked = item.actual_start_date.is_some()
                && within(item.actual_start_date, item.actual_end_date.or(Some(today)), date);
            if planned || worked {
                items.push(AgendaItem {
                    project_id: project.id.clone(),
                    project_name: project.name.clone(),
                    item: item.detached(),
                });
            }
        }

        for issue in project.issues.iter().filter(|i| i.created_on() == Some(date)) {
            issues.push(AgendaIssue {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                issue: issue.clone(),
            });
        }
    }

    tracing::debug!("Agenda for {}: {} items, {} issues", date, items.len(), issues.len());
    DayAgenda { date, items, issues }
}

// Backwards intervals cover nothing.
fn within(start: Option<NaiveDate>, end: Option<NaiveDate>, day: NaiveDate) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start <= day && day <= end,
        _ => false,
    }
}
