//! Worktrack Report
//!
//! Numeric series behind the dashboard's charts and generated reports:
//! - Weekly and monthly progress buckets
//! - Burndown (ideal versus actual remaining weight)
//! - Gantt schedule bars
//! - Month calendar markers and daily agendas
//! - Alerts for urgent issues, overdue items and near deadlines
//! - Portfolio summaries and date-filtered task rows
//!
//! Nothing here reads the clock; every function that depends on the current
//! date takes `today` explicitly.

pub mod alerts;
pub mod burndown;
pub mod calendar;
pub mod gantt;
pub mod period;
pub mod range;
pub mod summary;

pub use alerts::{collect_alerts, collect_alerts_within, Alert, AlertKind};
pub use burndown::{burndown, burndown_with_tail, BurndownPoint};
pub use calendar::{
    calendar_month, day_agenda, day_status, month_grid, AgendaIssue, AgendaItem, CalendarDay,
    DayAgenda, DayStatus,
};
pub use gantt::{chart_days, schedule_bars, ScheduleBar};
pub use period::{monthly_progress, period_progress, weekly_progress, PeriodProgress};
pub use range::DateRange;
pub use summary::{portfolio_items, project_summaries, status_counts, task_rows, ProjectSummary};
