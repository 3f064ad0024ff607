//! Portfolio summaries and report rows

use crate::range::DateRange;
use serde::Serialize;
use std::collections::BTreeMap;
use worktrack_core::{build_forest, flatten_with_depth, rollup_progress, DepthRow};
use worktrack_model::{Project, ProjectStatus, WorkItem};

/// Number of projects in each lifecycle stage; stages with none are omitted.
#[must_use]
pub fn status_counts(projects: &[Project]) -> BTreeMap<ProjectStatus, usize> {
    projects.iter().fold(BTreeMap::new(), |mut acc, p| {
        *acc.entry(p.status).or_insert(0) += 1;
        acc
    })
}

/// One line of the portfolio table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    /// Project identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Lifecycle stage
    pub status: ProjectStatus,
    /// Rolled-up progress, 0..=100
    pub progress: u8,
}

/// Per-project rollup progress, in input order.
#[must_use]
pub fn project_summaries(projects: &[Project]) -> Vec<ProjectSummary> {
    projects
        .iter()
        .map(|p| ProjectSummary {
            id: p.id.clone(),
            name: p.name.clone(),
            status: p.status,
            progress: rollup_progress(&p.items),
        })
        .collect()
}

/// Items of every project in one flat list, for portfolio-wide series.
#[must_use]
pub fn portfolio_items(projects: &[Project]) -> Vec<WorkItem> {
    projects.iter().flat_map(|p| p.items.iter().cloned()).collect()
}

/// Depth-annotated rows of a project's tree that were planned to finish, or
/// actually finished, inside `range`.
#[must_use]
pub fn task_rows(project: &Project, range: DateRange) -> Vec<DepthRow> {
    flatten_with_depth(&build_forest(&project.items))
        .into_iter()
        .filter(|row| range.contains_opt(row.item.plan_end_date) || range.contains_opt(row.item.actual_end_date))
        .collect()
}
