//! Dashboard alerts
//!
//! Three kinds, listed in this order: urgent issues, overdue items, and
//! projects in execution whose end date is near.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use worktrack_model::{Project, ProjectStatus};

/// Days ahead of a project's end date at which a deadline alert appears
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Alert category; the declaration order is the display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AlertKind {
    /// Unresolved critical or high-priority issue
    Issue,
    /// Item past its planned finish and not complete
    Overdue,
    /// Project end date approaching
    Deadline,
}

/// A single dashboard notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Stable key, unique per subject
    pub id: String,
    /// Project the alert belongs to
    pub project_id: String,
    /// Project display name
    pub project_name: String,
    /// Category
    pub kind: AlertKind,
    /// Human-readable text
    pub message: String,
    /// Date the alert is about
    pub date: Option<NaiveDate>,
}

/// Alerts across `projects` with the default seven-day deadline horizon.
#[must_use]
pub fn collect_alerts(projects: &[Project], today: NaiveDate) -> Vec<Alert> {
    collect_alerts_within(projects, today, DEFAULT_HORIZON_DAYS)
}

/// Alerts across `projects`, sorted by kind and otherwise in project order.
#[must_use]
pub fn collect_alerts_within(projects: &[Project], today: NaiveDate, horizon_days: u32) -> Vec<Alert> {
    let horizon = today
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut alerts = Vec::new();
    for project in projects {
        let alert = |id: String, kind, message: String, date| Alert {
            id,
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            kind,
            message,
            date,
        };

        if project.status == ProjectStatus::Execution {
            if let Some(end) = project.end_date.filter(|end| today < *end && *end <= horizon) {
                let left = (end - today).num_days();
                alerts.push(alert(
                    format!("proj-{}-end", project.id),
                    AlertKind::Deadline,
                    format!("Project ends in {left} days"),
                    Some(end),
                ));
            }
        }

        for issue in project.issues.iter().filter(|i| i.is_urgent()) {
            alerts.push(alert(
                format!("issue-{}", issue.id),
                AlertKind::Issue,
                format!("[{}] issue: {}", issue.priority, issue.title),
                issue.created_on(),
            ));
        }

        for item in project.items.iter().filter(|i| !i.status.is_complete()) {
            let Some(plan_end) = item.plan_end_date else {
                continue;
            };
            let delay = (today - plan_end).num_days();
            if delay > 0 {
                alerts.push(alert(
                    format!("item-{}-overdue", item.id),
                    AlertKind::Overdue,
                    format!("Item delayed: {} ({delay} days)", item.name),
                    Some(plan_end),
                ));
            }
        }
    }

    alerts.sort_by_key(|a| a.kind);
    tracing::debug!("Collected {} alerts over {} projects", alerts.len(), projects.len());
    alerts
}
