//! Projects and their lifecycle
//!
//! A project moves forward through four stages and can be terminated early
//! from any stage that is not already terminal.

use crate::error::ModelError;
use crate::issue::Issue;
use crate::item::WorkItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a project
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum ProjectStatus {
    /// Bid or proposal being prepared
    #[default]
    Proposal,
    /// Contract signed
    Contract,
    /// Work under way
    Execution,
    /// Closed
    Termination,
}

impl ProjectStatus {
    /// All stages in lifecycle order
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Proposal,
        ProjectStatus::Contract,
        ProjectStatus::Execution,
        ProjectStatus::Termination,
    ];

    /// Stages reachable in one step from `self`
    #[must_use]
    pub fn allowed_transitions(self) -> Vec<ProjectStatus> {
        match self {
            Self::Proposal => vec![Self::Contract, Self::Termination],
            Self::Contract => vec![Self::Execution, Self::Termination],
            Self::Execution => vec![Self::Termination],
            Self::Termination => vec![],
        }
    }

    /// Check if no further transition is possible
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, ProjectStatus::Termination)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProjectStatus::Proposal => "Proposal",
            ProjectStatus::Contract => "Contract",
            ProjectStatus::Execution => "Execution",
            ProjectStatus::Termination => "Termination",
        };
        f.write_str(s)
    }
}

/// Validates a lifecycle transition.
pub fn validate_transition(from: ProjectStatus, to: ProjectStatus) -> Result<(), ModelError> {
    if from.allowed_transitions().contains(&to) {
        Ok(())
    } else {
        Err(ModelError::IllegalTransition { from, to })
    }
}

/// A project with its flat item list and issues
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project identifier
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Lifecycle stage
    #[serde(default)]
    pub status: ProjectStatus,
    /// Reporting period start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Reporting period end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Flat work items
    #[serde(default)]
    pub items: Vec<WorkItem>,
    /// Issues raised against the project
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl Project {
    /// Create a new project in the proposal stage
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// With lifecycle stage, bypassing transition checks (for loading)
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// With reporting period
    #[inline]
    #[must_use]
    pub fn with_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// With flat items
    #[inline]
    #[must_use]
    pub fn with_items(mut self, items: Vec<WorkItem>) -> Self {
        self.items = items;
        self
    }

    /// With issues
    #[inline]
    #[must_use]
    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = issues;
        self
    }

    /// Move the project to `to` if the lifecycle allows it
    pub fn advance_to(&mut self, to: ProjectStatus) -> Result<(), ModelError> {
        validate_transition(self.status, to)?;
        self.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_allowed() {
        assert!(validate_transition(ProjectStatus::Proposal, ProjectStatus::Contract).is_ok());
        assert!(validate_transition(ProjectStatus::Contract, ProjectStatus::Execution).is_ok());
        assert!(validate_transition(ProjectStatus::Execution, ProjectStatus::Termination).is_ok());
    }

    #[test]
    fn early_termination_allowed() {
        assert!(validate_transition(ProjectStatus::Proposal, ProjectStatus::Termination).is_ok());
    }

    #[test]
    fn backward_and_skip_rejected() {
        assert_eq!(
            validate_transition(ProjectStatus::Contract, ProjectStatus::Proposal),
            Err(ModelError::IllegalTransition {
                from: ProjectStatus::Contract,
                to: ProjectStatus::Proposal,
            })
        );
        assert!(validate_transition(ProjectStatus::Proposal, ProjectStatus::Execution).is_err());
        assert!(validate_transition(ProjectStatus::Execution, ProjectStatus::Execution).is_err());
    }

    #[test]
    fn transition_table() {
        let table: Vec<(ProjectStatus, Vec<ProjectStatus>)> = ProjectStatus::ALL
            .iter()
            .map(|&s| (s, s.allowed_transitions()))
            .collect();
        assert_eq!(
            table,
            vec![
                (ProjectStatus::Proposal, vec![ProjectStatus::Contract, ProjectStatus::Termination]),
                (ProjectStatus::Contract, vec![ProjectStatus::Execution, ProjectStatus::Termination]),
                (ProjectStatus::Execution, vec![ProjectStatus::Termination]),
                (ProjectStatus::Termination, vec![]),
            ]
        );
    }

    #[test]
    fn termination_is_terminal() {
        assert!(ProjectStatus::Termination.allowed_transitions().is_empty());
        assert!(ProjectStatus::Termination.is_terminal());
    }

    #[test]
    fn advance_applies_only_legal_moves() {
        let mut project = Project::new("p1", "Warehouse");
        project.advance_to(ProjectStatus::Contract).unwrap();
        assert_eq!(project.status, ProjectStatus::Contract);

        let err = project.advance_to(ProjectStatus::Proposal).unwrap_err();
        assert_eq!(err.to_string(), "illegal project transition: Contract -> Proposal");
        assert_eq!(project.status, ProjectStatus::Contract);
    }
}
